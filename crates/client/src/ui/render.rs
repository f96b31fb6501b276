use ratatui::{prelude::*, widgets::*};
use tui_input::Input;

use super::banner::BannerKind;
use super::format::{format_number, money};
use super::state::{EmployeesPage, Focus, Modal, FIELD_LABELS};

const HEADERS: [&str; 5] = ["Nome", "Dias trabalhados", "Valor / Hora", "Horas trabalhadas", "Salário"];

pub fn draw(f: &mut Frame, page: &EmployeesPage) {
    if let Some(err) = &page.error {
        draw_error(f, err);
        return;
    }

    let banner_height = if page.banner.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Length(3),             // Search + order
            Constraint::Length(banner_height), // Banner
            Constraint::Min(3),                // Table
            Constraint::Length(3),             // Pager
            Constraint::Length(1),             // Help
        ])
        .split(f.area());

    draw_header(f, page, chunks[0]);
    draw_controls(f, page, chunks[1]);
    if let Some(banner) = &page.banner {
        let color = match banner.kind {
            BannerKind::Success => Color::Green,
            BannerKind::Error => Color::Red,
        };
        let p = Paragraph::new(banner.text)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)));
        f.render_widget(p, chunks[2]);
    }
    draw_table(f, page, chunks[3]);
    draw_pager(f, page, chunks[4]);

    let help = match page.focus {
        Focus::Table => "/ pesquisar  o ordenar  ←/→ páginas  ↑/↓ selecionar  n novo  e editar  d deletar  q sair",
        Focus::Search => "Enter pesquisar  Esc voltar",
        Focus::Modal => "Tab próximo campo  Enter salvar  Esc cancelar",
    };
    f.render_widget(Paragraph::new(help).style(Style::default().fg(Color::DarkGray)), chunks[5]);

    if let Some(modal) = &page.modal {
        draw_modal(f, modal);
    }
}

fn draw_error(f: &mut Frame, err: &str) {
    let p = Paragraph::new(vec![
        Line::from(Span::styled(format!("Error: {err}"), Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(Span::styled("q para sair", Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(p, f.area());
}

fn draw_header(f: &mut Frame, page: &EmployeesPage, area: Rect) {
    let status = if page.loading {
        Span::styled(" Carregando... ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    } else {
        Span::styled(
            format!(" {} registros ", page.total_employees),
            Style::default().fg(Color::Green),
        )
    };
    let title = Paragraph::new(Line::from(vec![
        Span::styled(" Funcionários ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("|"),
        status,
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));
    f.render_widget(title, area);
}

fn draw_controls(f: &mut Frame, page: &EmployeesPage, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    draw_input(f, &page.search, " Pesquisar por nome ", cols[0], page.focus == Focus::Search);

    let order = Paragraph::new(page.order.label())
        .block(Block::default().borders(Borders::ALL).title(" Ordenar por "));
    f.render_widget(order, cols[1]);
}

fn draw_input(f: &mut Frame, input: &Input, title: &str, area: Rect, focused: bool) {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let width = area.width.max(3) - 3;
    let scroll = input.visual_scroll(width as usize);
    let p = Paragraph::new(input.value())
        .style(style)
        .scroll((0, scroll as u16))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(p, area);

    if focused {
        f.set_cursor_position((
            area.x + ((input.visual_cursor().max(scroll) - scroll) as u16) + 1,
            area.y + 1,
        ));
    }
}

fn draw_table(f: &mut Frame, page: &EmployeesPage, area: Rect) {
    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h)))
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = page.employees.iter().map(|e| {
        Row::new(vec![
            Cell::from(e.name.clone()),
            Cell::from(e.days_worked.to_string()),
            Cell::from(money(e.hour_cost)),
            Cell::from(format_number(e.hours_worked)),
            Cell::from(money(e.salary())),
        ])
    });
    let widths = [
        Constraint::Percentage(30),
        Constraint::Percentage(15),
        Constraint::Percentage(18),
        Constraint::Percentage(17),
        Constraint::Percentage(20),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL))
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = TableState::default();
    if !page.employees.is_empty() && page.focus == Focus::Table {
        state.select(Some(page.selected));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_pager(f: &mut Frame, page: &EmployeesPage, area: Rect) {
    let enabled = |on: bool| {
        if on {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    let line = Line::from(vec![
        Span::styled("← Página anterior", enabled(page.has_prev())),
        Span::raw(format!("   Página {} de {}   ", page.current_page, page.total_pages.max(1))),
        Span::styled("Próxima página →", enabled(page.has_next())),
    ]);
    let p = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}

fn draw_modal(f: &mut Frame, modal: &Modal) {
    let area = centered(f.area(), 60, 3 * FIELD_LABELS.len() as u16 + 2);
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", modal.title()))
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3); FIELD_LABELS.len()])
        .split(inner);
    for (i, label) in FIELD_LABELS.iter().enumerate() {
        draw_input(f, &modal.fields[i], label, rows[i], modal.focus == i);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
