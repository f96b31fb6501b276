//! Page state for the employee listing.
//!
//! Every change goes through [`EmployeesPage::update`], which returns at most
//! one [`Command`] for the runtime to execute. Results come back as messages.

use std::time::Instant;

use tui_input::{Input, InputRequest};

use super::banner::{self, Banner};
use super::format::format_number;
use crate::api::{Employee, EmployeeForm, EmployeePage as PageData};

/// Salary ordering sent as `orderBy`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    None,
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "-",
            Self::Asc => "Menor salário",
            Self::Desc => "Maior salário",
        }
    }

    /// `None -> Asc -> Desc -> None`
    pub fn next(self) -> Self {
        match self {
            Self::None => Self::Asc,
            Self::Asc => Self::Desc,
            Self::Desc => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    fn success_text(self) -> &'static str {
        match self {
            Self::Create => banner::CREATED,
            Self::Update => banner::UPDATED,
            Self::Delete => banner::DELETED,
        }
    }
}

/// Which widget receives typed characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Table,
    Search,
    Modal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Create,
    Edit(i32),
}

pub const FIELD_LABELS: [&str; 4] = ["Nome", "Dias trabalhados", "Valor / Hora", "Horas trabalhadas"];

#[derive(Debug, Clone)]
pub struct Modal {
    pub kind: ModalKind,
    pub fields: [Input; 4],
    pub focus: usize,
}

impl Modal {
    fn create() -> Self {
        Self { kind: ModalKind::Create, fields: Default::default(), focus: 0 }
    }

    fn edit(e: &Employee) -> Self {
        Self {
            kind: ModalKind::Edit(e.id),
            fields: [
                Input::new(e.name.clone()),
                Input::new(e.days_worked.to_string()),
                Input::new(format_number(e.hour_cost)),
                Input::new(format_number(e.hours_worked)),
            ],
            focus: 0,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            ModalKind::Create => "Novo Funcionário",
            ModalKind::Edit(_) => "Atualizar Funcionário",
        }
    }

    fn text(&self, i: usize) -> &str {
        self.fields[i].value().trim()
    }

    /// Fields whose text does not parse are left out of the body.
    pub fn form(&self) -> EmployeeForm {
        let decimal = |s: &str| s.parse::<f64>().ok().filter(|v| v.is_finite());
        EmployeeForm {
            name: Some(self.text(0)).filter(|s| !s.is_empty()).map(str::to_string),
            days_worked: self.text(1).parse::<i64>().ok(),
            hour_cost: decimal(self.text(2)),
            hours_worked: decimal(self.text(3)),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    Init,
    Fetched { page: u64, result: Result<PageData, String> },
    PrevPage,
    NextPage,
    FocusSearch,
    Search,
    Blur,
    Edit(InputRequest),
    CycleOrder,
    SelectUp,
    SelectDown,
    OpenCreate,
    OpenEdit,
    NextField,
    PrevField,
    CancelModal,
    SubmitModal,
    Delete,
    Mutated { mutation: Mutation, ok: bool, at: Instant },
    Tick(Instant),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Fetch { page: u64, query: String, order: SortOrder },
    Create(EmployeeForm),
    Update { id: i32, form: EmployeeForm },
    Delete(i32),
}

#[derive(Debug)]
pub struct EmployeesPage {
    pub employees: Vec<Employee>,
    pub current_page: u64,
    pub total_pages: u64,
    pub total_employees: u64,
    pub search: Input,
    pub order: SortOrder,
    pub loading: bool,
    /// Last list failure; shown instead of the table.
    pub error: Option<String>,
    pub banner: Option<Banner>,
    pub modal: Option<Modal>,
    pub focus: Focus,
    pub selected: usize,
    pub should_quit: bool,
}

impl Default for EmployeesPage {
    fn default() -> Self {
        Self {
            employees: Vec::new(),
            current_page: 1,
            total_pages: 0,
            total_employees: 0,
            search: Input::default(),
            order: SortOrder::None,
            loading: true,
            error: None,
            banner: None,
            modal: None,
            focus: Focus::Table,
            selected: 0,
            should_quit: false,
        }
    }
}

impl EmployeesPage {
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn selected_employee(&self) -> Option<&Employee> {
        self.employees.get(self.selected)
    }

    fn fetch(&mut self, page: u64) -> Option<Command> {
        self.loading = true;
        Some(Command::Fetch { page, query: self.search.value().to_string(), order: self.order })
    }

    pub fn update(&mut self, msg: Msg) -> Option<Command> {
        match msg {
            Msg::Init => self.fetch(self.current_page),
            Msg::Fetched { page, result } => {
                self.loading = false;
                match result {
                    Ok(data) => {
                        self.error = None;
                        self.employees = data.employees;
                        self.current_page = page;
                        self.total_pages = data.total_pages;
                        self.total_employees = data.total_employees;
                        self.selected = self.selected.min(self.employees.len().saturating_sub(1));
                        // the page emptied under us, e.g. after deleting its last row
                        if page > 1 && page > self.total_pages {
                            return self.fetch(self.total_pages.max(1));
                        }
                        None
                    }
                    Err(message) => {
                        self.error = Some(message);
                        None
                    }
                }
            }
            Msg::PrevPage if self.has_prev() => self.fetch(self.current_page - 1),
            Msg::NextPage if self.has_next() => self.fetch(self.current_page + 1),
            Msg::PrevPage | Msg::NextPage => None,
            Msg::FocusSearch => {
                self.focus = Focus::Search;
                None
            }
            Msg::Search => {
                self.focus = Focus::Table;
                self.fetch(1)
            }
            Msg::Blur => {
                if self.focus == Focus::Search {
                    self.focus = Focus::Table;
                }
                None
            }
            Msg::Edit(req) => {
                match self.focus {
                    Focus::Search => {
                        self.search.handle(req);
                    }
                    Focus::Modal => {
                        if let Some(modal) = self.modal.as_mut() {
                            modal.fields[modal.focus].handle(req);
                        }
                    }
                    Focus::Table => {}
                }
                None
            }
            Msg::CycleOrder => {
                self.order = self.order.next();
                self.fetch(self.current_page)
            }
            Msg::SelectUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            Msg::SelectDown => {
                if self.selected + 1 < self.employees.len() {
                    self.selected += 1;
                }
                None
            }
            Msg::OpenCreate => {
                self.modal = Some(Modal::create());
                self.focus = Focus::Modal;
                None
            }
            Msg::OpenEdit => {
                if let Some(modal) = self.selected_employee().map(Modal::edit) {
                    self.modal = Some(modal);
                    self.focus = Focus::Modal;
                }
                None
            }
            Msg::NextField => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.focus = (modal.focus + 1) % FIELD_LABELS.len();
                }
                None
            }
            Msg::PrevField => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.focus = (modal.focus + FIELD_LABELS.len() - 1) % FIELD_LABELS.len();
                }
                None
            }
            Msg::CancelModal => {
                self.modal = None;
                self.focus = Focus::Table;
                None
            }
            Msg::SubmitModal => {
                let modal = self.modal.take()?;
                self.focus = Focus::Table;
                let form = modal.form();
                Some(match modal.kind {
                    ModalKind::Create => Command::Create(form),
                    ModalKind::Edit(id) => Command::Update { id, form },
                })
            }
            Msg::Delete => self.selected_employee().map(|e| Command::Delete(e.id)),
            Msg::Mutated { mutation, ok, at } => {
                if ok {
                    self.banner = Some(Banner::success(mutation.success_text(), at));
                    self.fetch(self.current_page)
                } else {
                    self.banner = Some(Banner::error(at));
                    None
                }
            }
            Msg::Tick(now) => {
                if self.banner.as_ref().is_some_and(|b| b.is_expired(now)) {
                    self.banner = None;
                }
                None
            }
            Msg::Quit => {
                self.should_quit = true;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::banner::{BannerKind, BANNER_TTL};

    fn employee(id: i32, name: &str) -> Employee {
        Employee { id, name: name.into(), days_worked: 20, hour_cost: 15.5, hours_worked: 160.0 }
    }

    fn loaded(page: u64, total_pages: u64, rows: Vec<Employee>) -> Msg {
        let total_employees = rows.len() as u64;
        Msg::Fetched {
            page,
            result: Ok(PageData { employees: rows, current_page: page, total_employees, total_pages }),
        }
    }

    fn type_text(page: &mut EmployeesPage, text: &str) {
        for c in text.chars() {
            page.update(Msg::Edit(InputRequest::InsertChar(c)));
        }
    }

    #[test]
    fn init_fetches_first_page() {
        let mut page = EmployeesPage::default();
        assert_eq!(
            page.update(Msg::Init),
            Some(Command::Fetch { page: 1, query: String::new(), order: SortOrder::None })
        );
        assert!(page.loading);
    }

    #[test]
    fn prev_next_enablement() {
        let mut page = EmployeesPage::default();
        page.update(loaded(1, 3, vec![employee(1, "Ana")]));
        assert!(!page.has_prev());
        assert!(page.has_next());
        assert_eq!(page.update(Msg::PrevPage), None);

        page.update(loaded(3, 3, vec![employee(1, "Ana")]));
        assert!(page.has_prev());
        assert!(!page.has_next());
        assert_eq!(page.update(Msg::NextPage), None);

        page.update(loaded(1, 1, vec![]));
        assert!(!page.has_prev() && !page.has_next());
    }

    #[test]
    fn paging_keeps_query_and_order() {
        let mut page = EmployeesPage::default();
        page.update(loaded(2, 3, vec![employee(1, "Ana")]));
        page.order = SortOrder::Desc;
        page.search = Input::new("An".into());
        assert_eq!(
            page.update(Msg::NextPage),
            Some(Command::Fetch { page: 3, query: "An".into(), order: SortOrder::Desc })
        );
        assert_eq!(
            page.update(Msg::PrevPage),
            Some(Command::Fetch { page: 1, query: "An".into(), order: SortOrder::Desc })
        );
    }

    #[test]
    fn search_fetches_page_one_with_typed_text() {
        let mut page = EmployeesPage::default();
        page.update(loaded(3, 5, vec![employee(1, "Ana")]));
        page.update(Msg::FocusSearch);
        type_text(&mut page, "Car");
        assert_eq!(page.focus, Focus::Search);
        assert_eq!(
            page.update(Msg::Search),
            Some(Command::Fetch { page: 1, query: "Car".into(), order: SortOrder::None })
        );
        assert_eq!(page.focus, Focus::Table);
    }

    #[test]
    fn typing_outside_an_input_is_ignored() {
        let mut page = EmployeesPage::default();
        type_text(&mut page, "xyz");
        assert_eq!(page.search.value(), "");
    }

    #[test]
    fn order_change_refetches_current_page() {
        let mut page = EmployeesPage::default();
        page.update(loaded(2, 4, vec![employee(1, "Ana")]));
        assert_eq!(
            page.update(Msg::CycleOrder),
            Some(Command::Fetch { page: 2, query: String::new(), order: SortOrder::Asc })
        );
        page.update(Msg::CycleOrder);
        assert_eq!(page.order, SortOrder::Desc);
        page.update(Msg::CycleOrder);
        assert_eq!(page.order, SortOrder::None);
    }

    #[test]
    fn list_failure_sets_error() {
        let mut page = EmployeesPage::default();
        page.update(Msg::Init);
        page.update(Msg::Fetched { page: 1, result: Err("Failed to fetch employees".into()) });
        assert_eq!(page.error.as_deref(), Some("Failed to fetch employees"));
        assert!(!page.loading);
    }

    #[test]
    fn create_modal_omits_unparsable_fields() {
        let mut page = EmployeesPage::default();
        page.update(Msg::OpenCreate);
        assert_eq!(page.focus, Focus::Modal);
        type_text(&mut page, "Ana");
        page.update(Msg::NextField);
        type_text(&mut page, "20");
        page.update(Msg::NextField);
        type_text(&mut page, "abc");
        page.update(Msg::NextField);
        type_text(&mut page, "160");

        let cmd = page.update(Msg::SubmitModal);
        assert_eq!(
            cmd,
            Some(Command::Create(EmployeeForm {
                name: Some("Ana".into()),
                days_worked: Some(20),
                hour_cost: None,
                hours_worked: Some(160.0),
            }))
        );
        assert!(page.modal.is_none());
        assert_eq!(page.focus, Focus::Table);
    }

    #[test]
    fn edit_modal_prefills_selected_row() {
        let mut page = EmployeesPage::default();
        page.update(loaded(1, 1, vec![employee(1, "Ana"), employee(2, "Bia")]));
        page.update(Msg::SelectDown);
        page.update(Msg::OpenEdit);

        let modal = page.modal.as_ref().expect("modal open");
        assert_eq!(modal.kind, ModalKind::Edit(2));
        assert_eq!(modal.fields[0].value(), "Bia");
        assert_eq!(modal.fields[2].value(), "15.5");
        assert_eq!(modal.fields[3].value(), "160");

        page.update(Msg::PrevField);
        page.update(Msg::Edit(InputRequest::DeleteLine));
        type_text(&mut page, "100.5");
        match page.update(Msg::SubmitModal) {
            Some(Command::Update { id, form }) => {
                assert_eq!(id, 2);
                assert_eq!(form.name.as_deref(), Some("Bia"));
                assert_eq!(form.hours_worked, Some(100.5));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn edit_and_delete_need_a_row() {
        let mut page = EmployeesPage::default();
        page.update(loaded(1, 0, vec![]));
        assert_eq!(page.update(Msg::Delete), None);
        page.update(Msg::OpenEdit);
        assert!(page.modal.is_none());
    }

    #[test]
    fn delete_targets_selected_row() {
        let mut page = EmployeesPage::default();
        page.update(loaded(1, 1, vec![employee(4, "Ana"), employee(9, "Bia")]));
        page.update(Msg::SelectDown);
        page.update(Msg::SelectDown);
        assert_eq!(page.update(Msg::Delete), Some(Command::Delete(9)));
    }

    #[test]
    fn successful_mutation_shows_banner_and_reloads() {
        let mut page = EmployeesPage::default();
        page.update(loaded(2, 2, vec![employee(1, "Ana")]));
        let t0 = Instant::now();
        let cmd = page.update(Msg::Mutated { mutation: Mutation::Create, ok: true, at: t0 });
        assert_eq!(cmd, Some(Command::Fetch { page: 2, query: String::new(), order: SortOrder::None }));
        let b = page.banner.as_ref().expect("banner");
        assert_eq!(b.kind, BannerKind::Success);
        assert_eq!(b.text, "Funcionário salvo com sucesso!");

        page.update(Msg::Tick(t0 + BANNER_TTL / 2));
        assert!(page.banner.is_some());
        page.update(Msg::Tick(t0 + BANNER_TTL));
        assert!(page.banner.is_none());
    }

    #[test]
    fn failed_mutation_shows_error_banner_without_reload() {
        let mut page = EmployeesPage::default();
        let t0 = Instant::now();
        let cmd = page.update(Msg::Mutated { mutation: Mutation::Delete, ok: false, at: t0 });
        assert_eq!(cmd, None);
        let b = page.banner.as_ref().expect("banner");
        assert_eq!(b.kind, BannerKind::Error);
        assert_eq!(b.text, "Erro! Tente novamente");
    }

    #[test]
    fn emptied_last_page_steps_back() {
        let mut page = EmployeesPage::default();
        page.update(loaded(2, 2, vec![employee(11, "Ana")]));
        let t0 = Instant::now();
        page.update(Msg::Mutated { mutation: Mutation::Delete, ok: true, at: t0 });

        let cmd = page.update(loaded(2, 1, vec![]));
        assert_eq!(cmd, Some(Command::Fetch { page: 1, query: String::new(), order: SortOrder::None }));

        assert_eq!(page.update(loaded(1, 1, vec![employee(1, "Bia")])), None);
        assert_eq!(page.current_page, 1);
        assert!(!page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn emptying_the_only_page_stays_on_page_one() {
        let mut page = EmployeesPage::default();
        assert_eq!(page.update(loaded(1, 0, vec![])), None);
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn selection_is_clamped_after_reload() {
        let mut page = EmployeesPage::default();
        page.update(loaded(1, 1, vec![employee(1, "A"), employee(2, "B"), employee(3, "C")]));
        page.update(Msg::SelectDown);
        page.update(Msg::SelectDown);
        page.update(loaded(1, 1, vec![employee(1, "A")]));
        assert_eq!(page.selected, 0);
    }
}
