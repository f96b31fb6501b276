use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};
use tui_input::backend::crossterm::to_input_request;

use crate::api::EmployeeApi;
use crate::ui::{render, Command, EmployeesPage, Focus, Msg, Mutation};

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Take over the terminal and run the page until the user quits.
pub async fn run(api: EmployeeApi) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_app(&mut terminal, &api).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

async fn run_app(terminal: &mut Term, api: &EmployeeApi) -> anyhow::Result<()> {
    let mut page = EmployeesPage::default();
    info!(base_url = api.base_url(), "client started");
    settle(api, &mut page, Msg::Init, |p| draw(terminal, p)).await?;

    loop {
        draw(terminal, &page)?;
        if page.should_quit {
            info!("client exiting");
            return Ok(());
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    if let Some(msg) = key_to_msg(&page, key) {
                        settle(api, &mut page, msg, |p| draw(terminal, p)).await?;
                    }
                }
            }
        }
        page.update(Msg::Tick(Instant::now()));
    }
}

fn draw(terminal: &mut Term, page: &EmployeesPage) -> io::Result<()> {
    terminal.draw(|f| render::draw(f, page)).map(|_| ())
}

/// Apply `msg`, then run commands one at a time until the page is idle.
/// `redraw` runs before each request so the loading state is visible.
pub async fn settle<F>(api: &EmployeeApi, page: &mut EmployeesPage, msg: Msg, mut redraw: F) -> io::Result<()>
where
    F: FnMut(&EmployeesPage) -> io::Result<()>,
{
    let mut next = page.update(msg);
    while let Some(cmd) = next {
        redraw(page)?;
        let reply = execute(api, cmd).await;
        next = page.update(reply);
    }
    Ok(())
}

/// Run one command against the API and turn the outcome into a message.
pub async fn execute(api: &EmployeeApi, cmd: Command) -> Msg {
    debug!(?cmd, "execute");
    match cmd {
        Command::Fetch { page, query, order } => {
            let result = api.list(page, &query, order.as_str()).await.map_err(|e| e.to_string());
            Msg::Fetched { page, result }
        }
        Command::Create(form) => {
            let ok = api.create(&form).await;
            Msg::Mutated { mutation: Mutation::Create, ok, at: Instant::now() }
        }
        Command::Update { id, form } => {
            let ok = api.update(id, &form).await;
            Msg::Mutated { mutation: Mutation::Update, ok, at: Instant::now() }
        }
        Command::Delete(id) => {
            let ok = api.remove(id).await;
            Msg::Mutated { mutation: Mutation::Delete, ok, at: Instant::now() }
        }
    }
}

/// Key bindings per focus.
pub fn key_to_msg(page: &EmployeesPage, key: KeyEvent) -> Option<Msg> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Msg::Quit);
    }
    if page.error.is_some() {
        return matches!(key.code, KeyCode::Char('q') | KeyCode::Esc).then_some(Msg::Quit);
    }
    match page.focus {
        Focus::Table => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Msg::Quit),
            KeyCode::Char('/') => Some(Msg::FocusSearch),
            KeyCode::Char('o') => Some(Msg::CycleOrder),
            KeyCode::Left => Some(Msg::PrevPage),
            KeyCode::Right => Some(Msg::NextPage),
            KeyCode::Up => Some(Msg::SelectUp),
            KeyCode::Down => Some(Msg::SelectDown),
            KeyCode::Char('n') => Some(Msg::OpenCreate),
            KeyCode::Char('e') => Some(Msg::OpenEdit),
            KeyCode::Char('d') => Some(Msg::Delete),
            _ => None,
        },
        Focus::Search => match key.code {
            KeyCode::Enter => Some(Msg::Search),
            KeyCode::Esc => Some(Msg::Blur),
            _ => to_input_request(&Event::Key(key)).map(Msg::Edit),
        },
        Focus::Modal => match key.code {
            KeyCode::Enter => Some(Msg::SubmitModal),
            KeyCode::Esc => Some(Msg::CancelModal),
            KeyCode::Tab | KeyCode::Down => Some(Msg::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(Msg::PrevField),
            _ => to_input_request(&Event::Key(key)).map(Msg::Edit),
        },
    }
}
