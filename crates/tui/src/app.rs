use std::io::{Stdout, stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use folio_core::model::contact::ContactField;
use folio_core::model::page::Page;
use folio_core::views::{LayoutMetrics, PageLayout, SectionState, hit_test, render_page};
use folio_core::{PortfolioConfig, Scheduler};
use folio_protocol::{HitTarget, Point, Viewport};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Paragraph},
};
use tracing::{debug, info};

use crate::renderer::CellPainter;

/// Longest the loop sleeps without input, so resizes are picked up.
const MAX_POLL: Duration = Duration::from_millis(250);
/// Rows moved per arrow key or wheel notch.
const LINE_STEP: f64 = 1.0;
const WHEEL_STEP: f64 = 3.0;

/// Puts the terminal back on every exit path, including panics.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut out = stdout();
        execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(out))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Terminal rendition of the portfolio page.
pub struct PortfolioTui {
    config: PortfolioConfig,
    page: Page,
    metrics: LayoutMetrics,
    scroll_y: f64,
    focused: Option<ContactField>,
    started: Instant,
}

impl PortfolioTui {
    /// The tracker settings are pixel-denominated; they are scaled to rows
    /// before the page is built.
    pub fn new(mut config: PortfolioConfig, scheduler: &Scheduler) -> Result<Self> {
        let metrics = LayoutMetrics::cells();
        config.tracker = config.tracker.scaled(metrics.scale());
        let page = Page::new(&config, scheduler, 0)?;
        Ok(Self {
            config,
            page,
            metrics,
            scroll_y: 0.0,
            focused: None,
            started: Instant::now(),
        })
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn layout(&self, viewport: &Viewport) -> PageLayout {
        let state = SectionState::from_page(&self.page, self.focused);
        PageLayout::compute(
            &self.config.content,
            self.page.tracker().registry(),
            &state,
            &self.metrics,
            viewport,
        )
    }

    pub fn run(mut self) -> Result<()> {
        let mut guard = TerminalGuard::enter()?;
        info!("terminal ui started");

        loop {
            self.page.run_timers(self.now_ms());

            let size = guard.terminal.size()?;
            let content = Rect::new(0, 0, size.width, size.height.saturating_sub(1));
            let viewport = Viewport::new(f64::from(content.width), f64::from(content.height));
            let layout = self.layout(&viewport);
            self.scroll_y = layout.clamp_scroll(self.scroll_y);
            self.page.on_scroll(self.scroll_y, &layout);

            let viewport = viewport.scrolled_to(self.scroll_y);
            let state = SectionState::from_page(&self.page, self.focused);
            let commands = render_page(
                &self.page,
                &self.config.content,
                &layout,
                &state,
                &self.metrics,
                &viewport,
            );
            let status = self.status_line(&layout);

            guard.terminal.draw(|frame| {
                CellPainter::new(frame.buffer_mut(), content).paint(&commands);
                let status_area = Rect::new(0, content.height, size.width, 1);
                frame.render_widget(
                    Paragraph::new(status)
                        .block(Block::default())
                        .style(Style::default().fg(Color::White).bg(Color::DarkGray)),
                    status_area,
                );
            })?;

            let timeout = self
                .page
                .scheduler()
                .next_deadline()
                .map(|deadline| Duration::from_millis(deadline.saturating_sub(self.now_ms())))
                .map_or(MAX_POLL, |wait| wait.min(MAX_POLL));

            if event::poll(timeout)? {
                let flow = match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.on_key(key, &layout, viewport.height)
                    }
                    Event::Mouse(mouse) => {
                        match mouse.kind {
                            MouseEventKind::ScrollDown => self.scroll_y += WHEEL_STEP,
                            MouseEventKind::ScrollUp => self.scroll_y -= WHEEL_STEP,
                            MouseEventKind::Down(MouseButton::Left) => {
                                let point = Point::new(
                                    f64::from(mouse.column) + 0.5,
                                    f64::from(mouse.row) + 0.5,
                                );
                                match hit_test(&commands, point) {
                                    Some(target) => self.dispatch(target, &layout),
                                    None => self.focused = None,
                                }
                            }
                            _ => {}
                        }
                        Flow::Continue
                    }
                    _ => Flow::Continue,
                };
                if let Flow::Quit = flow {
                    break;
                }
            }
        }

        info!("terminal ui closed");
        Ok(())
    }

    fn status_line(&self, layout: &PageLayout) -> String {
        let position = if layout.max_scroll() > 0.0 {
            format!("{:.0}%", self.scroll_y / layout.max_scroll() * 100.0)
        } else {
            "All".to_owned()
        };
        match self.focused {
            Some(field) => format!(
                " editing {} | Tab next field | Enter send | Esc done ",
                field.name()
            ),
            None => format!(
                " folio | {} | {} | ↑↓ scroll | 1-{} jump | m menu | c contact | q quit ",
                self.page.active_section(),
                position,
                self.page.navigation().items().len().min(9),
            ),
        }
    }

    fn on_key(&mut self, key: KeyEvent, layout: &PageLayout, page_height: f64) -> Flow {
        if let Some(field) = self.focused {
            match key.code {
                KeyCode::Char(c) => self.page.contact_field_mut(field).push(c),
                KeyCode::Backspace => {
                    self.page.contact_field_mut(field).pop();
                }
                KeyCode::Enter => self.submit(),
                KeyCode::Tab => self.focused = Some(field.next()),
                KeyCode::Esc => self.focused = None,
                _ => {}
            }
            return Flow::Continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Up | KeyCode::Char('k') => self.scroll_y -= LINE_STEP,
            KeyCode::Down | KeyCode::Char('j') => self.scroll_y += LINE_STEP,
            KeyCode::PageUp => self.scroll_y -= page_height,
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_y += page_height,
            KeyCode::Home | KeyCode::Char('g') => self.scroll_y = 0.0,
            KeyCode::End | KeyCode::Char('G') => self.scroll_y = layout.max_scroll(),
            KeyCode::Char('m') => self.page.toggle_menu(),
            KeyCode::Char('c') => {
                self.dispatch(HitTarget::Section("contact".into()), layout);
                self.focused = Some(ContactField::Name);
            }
            KeyCode::Char('x') => self.page.dismiss_toast(),
            KeyCode::Char(digit @ '1'..='9') => {
                let index = digit as usize - '1' as usize;
                let id = self
                    .page
                    .navigation()
                    .items()
                    .get(index)
                    .map(|item| item.id.clone());
                if let Some(id) = id {
                    self.dispatch(HitTarget::Section(id), layout);
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn submit(&mut self) {
        let now_ms = self.now_ms();
        if let Err(e) = self.page.submit_contact(now_ms) {
            debug!(error = %e, "contact form rejected");
        }
    }

    fn dispatch(&mut self, target: HitTarget, layout: &PageLayout) {
        debug!(?target, "activate");
        match target {
            HitTarget::Section(id) => {
                self.focused = None;
                if let Some(top) = self.page.select_section(&id, layout) {
                    self.scroll_y = layout.clamp_scroll(top);
                }
            }
            HitTarget::ToggleMenu => self.page.toggle_menu(),
            HitTarget::FormField(name) => self.focused = ContactField::from_name(&name),
            HitTarget::SubmitForm => {
                self.focused = None;
                self.submit();
            }
            HitTarget::DismissToast => self.page.dismiss_toast(),
            // Links cannot be followed from the terminal.
            HitTarget::Link(url) => info!(%url, "link activated"),
        }
    }
}
