use client::api::{EmployeeApi, EmployeeForm};
use client::app::settle;
use client::ui::{EmployeesPage, Msg};
use client::ClientError;
use tokio::net::TcpListener;
use tui_input::Input;

/// Real server over an in-memory database; returns the `/api` base URL.
async fn start_server() -> anyhow::Result<String> {
    let db = models::db::connect_in_memory().await?;
    let app = server::build_app(db);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });
    Ok(format!("http://{}/api", addr))
}

fn api(base_url: &str) -> EmployeeApi {
    EmployeeApi::with_client(reqwest::Client::new(), base_url)
}

fn form(name: &str, hour_cost: f64, hours_worked: f64) -> EmployeeForm {
    EmployeeForm {
        name: Some(name.into()),
        days_worked: Some(20),
        hour_cost: Some(hour_cost),
        hours_worked: Some(hours_worked),
    }
}

#[tokio::test]
async fn crud_through_data_layer() -> anyhow::Result<()> {
    let api = api(&start_server().await?);

    assert!(api.create(&form("Ana", 15.5, 160.0)).await);
    assert!(!api.create(&EmployeeForm { name: Some("Bia".into()), ..Default::default() }).await);

    let page = api.list(1, "", "").await?;
    assert_eq!(page.total_employees, 1);
    let ana = &page.employees[0];
    assert_eq!(ana.salary(), 2480.0);

    let changes = EmployeeForm { hours_worked: Some(100.5), ..Default::default() };
    assert!(api.update(ana.id, &changes).await);
    assert_eq!(api.get(ana.id).await?.hours_worked, 100.5);
    assert!(!api.update(ana.id + 100, &changes).await);

    assert!(api.remove(ana.id).await);
    assert!(!api.remove(ana.id).await);
    match api.get(ana.id).await {
        Err(ClientError::Status { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Employee not found");
        }
        other => panic!("unexpected {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn list_encodes_query_parameters() -> anyhow::Result<()> {
    let api = api(&start_server().await?);
    assert!(api.create(&form("Ana & Bia", 1.0, 1.0)).await);
    assert!(api.create(&form("Carla", 1.0, 1.0)).await);

    let page = api.list(1, "& B", "").await?;
    assert_eq!(page.total_employees, 1);
    assert_eq!(page.employees[0].name, "Ana & Bia");
    Ok(())
}

#[tokio::test]
async fn unreachable_server_is_an_error() -> anyhow::Result<()> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    drop(listener);
    let api = api(&format!("http://{addr}/api"));

    assert!(matches!(api.list(1, "", "").await, Err(ClientError::Http(_))));
    assert!(!api.remove(1).await);
    Ok(())
}

#[tokio::test]
async fn page_reloads_after_create() -> anyhow::Result<()> {
    let api = api(&start_server().await?);
    let mut page = EmployeesPage::default();
    settle(&api, &mut page, Msg::Init, |_| Ok(())).await?;
    assert!(!page.loading);
    assert_eq!(page.total_employees, 0);

    settle(&api, &mut page, Msg::OpenCreate, |_| Ok(())).await?;
    page.modal.as_mut().expect("modal").fields = [
        Input::new("Ana".into()),
        Input::new("20".into()),
        Input::new("15.5".into()),
        Input::new("160".into()),
    ];
    settle(&api, &mut page, Msg::SubmitModal, |_| Ok(())).await?;

    assert_eq!(page.total_employees, 1);
    assert_eq!(page.employees[0].name, "Ana");
    assert_eq!(page.banner.as_ref().map(|b| b.text), Some("Funcionário salvo com sucesso!"));

    settle(&api, &mut page, Msg::Delete, |_| Ok(())).await?;
    assert_eq!(page.total_employees, 0);
    assert_eq!(page.banner.as_ref().map(|b| b.text), Some("Funcionário deletado com sucesso!"));
    Ok(())
}

#[tokio::test]
async fn invalid_form_shows_error_banner() -> anyhow::Result<()> {
    let api = api(&start_server().await?);
    let mut page = EmployeesPage::default();
    settle(&api, &mut page, Msg::Init, |_| Ok(())).await?;
    settle(&api, &mut page, Msg::OpenCreate, |_| Ok(())).await?;
    settle(&api, &mut page, Msg::SubmitModal, |_| Ok(())).await?;
    assert_eq!(page.banner.as_ref().map(|b| b.text), Some("Erro! Tente novamente"));
    assert_eq!(page.total_employees, 0);
    Ok(())
}
