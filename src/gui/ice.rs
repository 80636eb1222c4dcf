use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use iced::alignment::Vertical;
use iced::widget::{checkbox, column, container, horizontal_rule, image, pick_list, row, scrollable, text, Column, Row};
use iced::window::{self, Settings};
use iced::{Element, Length, Size, Task, Theme};
use rfd::AsyncFileDialog;
use strum::IntoEnumIterator;
use tracing::{info, warn};

use crate::gui::templates_n_methods::{
    btn_base, btn_style_header, card_style, padding_inner, path_to_file_name, tooltip_default, TEXT_DIM, TEXT_ERR, TEXT_OK,
};
use crate::models::{record::{Decision, RowId}, user_sheet::ReviewSettings};
use crate::settings::{load_settings, save_settings};
use crate::view::{ordering::ViewFilter, session::{ImageStatus, ReviewSession}};

const NO_LEN: Option<Length> = None;

/// Entry of the page pick list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLabel(pub usize);
impl fmt::Display for PageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page {}", self.0)
    }
}

#[derive(Debug, Clone)]
pub enum Exec {
    BeginPathToSheet,
    FinishPathToSheet(Option<PathBuf>),
    BeginLoadData,
    FinishLoadData(Option<PathBuf>),
    BeginSaveData,
    FinishSaveData(Option<PathBuf>),
    BeginExportCopy,
    FinishExportCopy(Option<PathBuf>),
    Reload,

    ToggleUndecided,
    PreviousPage,
    NextPage,
    JumpPage(PageLabel),

    ToggleRow(RowId),
    ExpandPage,
    CollapseAll,

    PickDecision(RowId, Decision),
    CommitDecision(RowId),
    OpenLink(String),

    Exit,
}

struct App {
    settings: ReviewSettings,
    settings_path: PathBuf,
    session: Option<ReviewSession>,
    pending: HashMap<RowId, Decision>, // Picked in the list but not committed yet
    status: Result<Option<String>, String>,
    is_file_dialog_open: bool,
    pick_list_decision: Vec<Decision>,
}

impl App {
    fn new(settings: ReviewSettings, settings_path: PathBuf) -> (Self, Task<Exec>) {
        let mut app = App {
            settings,
            settings_path,
            session: None,
            pending: HashMap::new(),
            status: Ok(None),
            is_file_dialog_open: false,
            pick_list_decision: Decision::iter().collect(),
        };
        app.open_session();
        (app, Task::none())
    }

    fn open_session(&mut self) {
        self.pending.clear();
        match ReviewSession::open(&self.settings) {
            Ok(session) => {
                self.status = Ok(Some(format!(
                    "Loaded {} products from {}",
                    session.store().len(),
                    path_to_file_name(session.store().path())
                )));
                self.session = Some(session);
            }
            Err(e) => {
                warn!("{}", e);
                self.status = Err(e.to_string());
                self.session = None;
            }
        }
    }

    fn update(state: &mut Self, exec: Exec) -> Task<Exec> {
        if state.is_file_dialog_open && !matches!(
            exec,
            Exec::FinishPathToSheet(_) | Exec::FinishLoadData(_) | Exec::FinishSaveData(_) | Exec::FinishExportCopy(_) | Exec::Exit
        ) { return Task::none() }

        match exec {
            Exec::Exit => window::get_latest().and_then(|id| window::close(id)),

            // File dialogs
            Exec::BeginPathToSheet => {
                state.is_file_dialog_open = true;
                Task::perform(
                    async {
                        AsyncFileDialog::new()
                            .set_directory(std::env::current_dir().unwrap_or_default())
                            .add_filter("EXCEL files", &["xlsx"])
                            .set_title("Open spreadsheet to review")
                            .pick_file()
                            .await
                            .map(|f| f.path().to_path_buf())
                    },
                    Exec::FinishPathToSheet,
                )
            }
            Exec::FinishPathToSheet(file) => {
                state.is_file_dialog_open = false;
                if let Some(path) = file {
                    state.settings.sheet.path_to_sheet = path;
                    state.open_session();
                }
                Task::none()
            }
            Exec::BeginLoadData => {
                state.is_file_dialog_open = true;
                Task::perform(
                    async {
                        AsyncFileDialog::new()
                            .set_directory(std::env::current_dir().unwrap_or_default())
                            .add_filter("JSON Files", &["json"])
                            .set_title("Load settings")
                            .pick_file()
                            .await
                            .map(|f| f.path().to_path_buf())
                    },
                    Exec::FinishLoadData,
                )
            }
            Exec::FinishLoadData(file) => {
                state.is_file_dialog_open = false;
                if let Some(path) = file {
                    match load_settings(&path) {
                        Ok(settings) => {
                            state.settings = settings;
                            state.settings_path = path;
                            state.open_session();
                        }
                        Err(e) => {
                            warn!("{}", e);
                            state.status = Err(e.to_string());
                        }
                    }
                }
                Task::none()
            }
            Exec::BeginSaveData => {
                state.is_file_dialog_open = true;
                let start = state.settings_path.clone();
                Task::perform(
                    async move {
                        let mut dialog = AsyncFileDialog::new()
                            .add_filter("JSON Files", &["json"])
                            .set_title("Save settings");
                        if let Some(name) = start.file_name() {
                            dialog = dialog.set_file_name(name.to_string_lossy());
                        }
                        dialog.save_file().await.map(|f| f.path().to_path_buf())
                    },
                    Exec::FinishSaveData,
                )
            }
            Exec::FinishSaveData(file) => {
                state.is_file_dialog_open = false;
                if let Some(path) = file {
                    state.status = match save_settings(&path, &state.settings) {
                        Ok(()) => {
                            let msg = format!("Saved settings to {}", path_to_file_name(&path));
                            state.settings_path = path;
                            Ok(Some(msg))
                        }
                        Err(e) => { warn!("{}", e); Err(e.to_string()) }
                    };
                }
                Task::none()
            }
            Exec::BeginExportCopy => {
                state.is_file_dialog_open = true;
                let name = path_to_file_name(&state.settings.sheet.path_to_sheet);
                Task::perform(
                    async move {
                        AsyncFileDialog::new()
                            .add_filter("EXCEL files", &["xlsx"])
                            .set_title("Export a copy of the spreadsheet")
                            .set_file_name(name)
                            .save_file()
                            .await
                            .map(|f| f.path().to_path_buf())
                    },
                    Exec::FinishExportCopy,
                )
            }
            Exec::FinishExportCopy(file) => {
                state.is_file_dialog_open = false;
                if let (Some(path), Some(session)) = (file, &state.session) {
                    state.status = match session.export_copy(&path) {
                        Ok(()) => Ok(Some(format!("Exported a copy to {}", path.display()))),
                        Err(e) => { warn!("{}", e); Err(e.to_string()) }
                    };
                }
                Task::none()
            }
            Exec::Reload => {
                match &mut state.session {
                    Some(session) => {
                        state.status = match session.reload() {
                            Ok(()) => Ok(Some(format!("Reloaded {} products", session.store().len()))),
                            Err(e) => { warn!("{}", e); Err(e.to_string()) }
                        };
                        state.pending.clear();
                    }
                    None => state.open_session(),
                }
                Task::none()
            }

            // Everything below needs a loaded sheet
            other => {
                let Some(session) = state.session.as_mut() else { return Task::none() };

                match other {
                    Exec::ToggleUndecided => {
                        let filter = session.toggle_undecided_filter();
                        state.settings.view.only_undecided = filter == ViewFilter::Undecided;
                    }
                    Exec::PreviousPage => { session.previous_page(); }
                    Exec::NextPage => { session.next_page(); }
                    Exec::JumpPage(PageLabel(page)) => {
                        if let Err(e) = session.jump_to(page) { state.status = Err(e.to_string()) }
                    }
                    Exec::ToggleRow(row) => { session.toggle_expanded(row); }
                    Exec::ExpandPage => session.expand_page(),
                    Exec::CollapseAll => session.collapse_all(),
                    Exec::PickDecision(row, decision) => { state.pending.insert(row, decision); }
                    Exec::CommitDecision(row) => {
                        let current = session.record(row).map(|r| r.decision).unwrap_or_default();
                        let decision = state.pending.get(&row).copied().unwrap_or(current);

                        state.status = match session.commit_decision(row, decision) {
                            Ok(()) => {
                                state.pending.remove(&row);
                                info!("Row {} set to {:?}", row + 1, decision);
                                Ok(Some(format!("Updated row {}!", row + 1)))
                            }
                            Err(e) => { warn!("{}", e); Err(e.to_string()) }
                        };
                    }
                    Exec::OpenLink(url) => {
                        if let Err(e) = open::that_detached(&url) {
                            warn!("Failed to open {}: {}", url, e);
                            state.status = Err(format!("Failed to open {url}: {e}"));
                        }
                    }
                    _ => {}
                }
                Task::none()
            }
        }
    }

    // VIEW LOGIC ------------------------------------------------------------------
    fn view(state: &Self) -> Element<'_, Exec> {
        let undecided_only = state.session.as_ref()
            .map(|s| s.filter() == ViewFilter::Undecided)
            .unwrap_or(state.settings.view.only_undecided);

        let top_bar: Row<Exec> = row![
            btn_base("Open sheet", NO_LEN, NO_LEN, Some(Exec::BeginPathToSheet)),
            btn_base("Load settings", NO_LEN, NO_LEN, Some(Exec::BeginLoadData)),
            btn_base("Save settings", NO_LEN, NO_LEN, Some(Exec::BeginSaveData)),
            btn_base("Export copy", NO_LEN, NO_LEN, state.session.as_ref().map(|_| Exec::BeginExportCopy)),
            btn_base("Reload", NO_LEN, NO_LEN, Some(Exec::Reload)),
            padding_inner(Length::Fill),
            checkbox("Undecided only", undecided_only).on_toggle(|_| Exec::ToggleUndecided),
            tooltip_default("Only list products that have no Y/N decision yet. Deciding a product removes it from this view.", 300),
            padding_inner(20),
            btn_base("Exit", Some(Length::Fixed(80.0)), NO_LEN, Some(Exec::Exit)),
        ].spacing(8).align_y(Vertical::Center);

        let status = match &state.status {
            Ok(Some(msg)) => text(msg.clone()).color(TEXT_OK),
            Ok(None) => text(""),
            Err(e) => text(e.clone()).color(TEXT_ERR),
        };

        let mut content: Column<Exec> = column![top_bar, status, horizontal_rule(2)].spacing(8).padding(10);

        let Some(session) = &state.session else {
            content = content.push(
                text(format!("No spreadsheet loaded ({})", state.settings.sheet.path_to_sheet.display()))
                    .color(TEXT_DIM),
            );
            return content.into();
        };

        let filter_info = if undecided_only {
            text("Filtering: only products without a decision are shown").color(TEXT_OK)
        } else {
            text("Showing every product").color(TEXT_DIM)
        };

        let page = session.current_page();
        let page_count = session.page_count();
        let pages: Vec<PageLabel> = (1..=page_count).map(PageLabel).collect();

        let navigation: Row<Exec> = row![
            btn_base("◀ Previous", NO_LEN, NO_LEN, (page > 1).then_some(Exec::PreviousPage)),
            pick_list(pages, Some(PageLabel(page)), Exec::JumpPage),
            btn_base("Next ▶", NO_LEN, NO_LEN, (page < page_count).then_some(Exec::NextPage)),
            padding_inner(Length::Fill),
            btn_base("Expand page", NO_LEN, NO_LEN, Some(Exec::ExpandPage)),
            btn_base("Collapse all", NO_LEN, NO_LEN, Some(Exec::CollapseAll)),
        ].spacing(8).align_y(Vertical::Center);

        let mut list: Column<Exec> = column![].spacing(6);
        for row_id in session.page_rows() {
            list = list.push(state.view_product(session, row_id));
        }

        content = content
            .push(filter_info)
            .push(navigation)
            .push(text(format!("Products - Page {}/{}", page, page_count)).size(22))
            .push(scrollable(list).height(Length::Fill));

        content.into()
    }

    fn view_product<'a>(&'a self, session: &'a ReviewSession, row_id: RowId) -> Element<'a, Exec> {
        let Some(record) = session.record(row_id) else { return column![].into() };
        let expanded = session.is_expanded(row_id);
        let position = session.position_of(row_id).unwrap_or(row_id + 1);

        let header = iced::widget::button(text(format!(
            "{} #{} | EAN: {} | Decision: {} | Sale: {} | BSR: {} | Seller: {}",
            if expanded { "▼" } else { "▶" },
            position, record.ean, record.decision.as_str(), record.sales_text, record.bsr, record.seller
        )))
            .width(Length::Fill)
            .on_press(Exec::ToggleRow(row_id))
            .style(btn_style_header());

        let mut card: Column<Exec> = column![header].spacing(8);

        if expanded {
            let picked = self.pending.get(&row_id).copied().unwrap_or(record.decision);

            let mut actions: Column<Exec> = column![
                text(format!("Decision (#{})", position)),
                pick_list(self.pick_list_decision.as_slice(), Some(picked), move |d| Exec::PickDecision(row_id, d)),
                btn_base(format!("Update row {}", row_id + 1), NO_LEN, NO_LEN, Some(Exec::CommitDecision(row_id))),
            ].spacing(6).width(Length::FillPortion(1));

            if let Some(link) = record.links.iter().find(|l| l.name == "Qogita") {
                actions = actions.push(btn_base("Link Qogita", NO_LEN, NO_LEN, Some(Exec::OpenLink(link.url.clone()))));
            }
            if let Some(url) = session.lookup_link(row_id) {
                actions = actions.push(btn_base("Link Selleramp", NO_LEN, NO_LEN, Some(Exec::OpenLink(url))));
            }
            if let Some(link) = record.links.iter().find(|l| l.name == "Amazon.fr") {
                actions = actions.push(btn_base("Link Amazon.fr", NO_LEN, NO_LEN, Some(Exec::OpenLink(link.url.clone()))));
            }

            let mut details: Column<Exec> = column![].spacing(4).width(Length::FillPortion(5));
            for field in session.store().sheet_info().detail_columns() {
                if record.cells.contains_key(field) {
                    details = details.push(text(format!("{}: {}", field, record.cell(field))));
                }
            }

            details = match session.image_for(row_id) {
                ImageStatus::Found(path) => details.push(
                    image::Viewer::<image::Handle>::new(image::Handle::from_path(path))
                        .width(Length::Fill)
                        .height(600)
                        .min_scale(0.5)
                        .max_scale(3.0)
                        .scale_step(0.1),
                ),
                ImageStatus::NotFound => details.push(
                    text(format!("No image found for EAN {}", crate::parsing::ean::normalize_ean(&record.ean))).color(TEXT_ERR),
                ),
            };

            card = card.push(row![actions, details].spacing(12));
        }

        container(card).padding(8).width(Length::Fill).style(card_style()).into()
    }
}

pub fn init_gui(settings: ReviewSettings, settings_path: PathBuf) -> iced::Result {
    info!("Starting review window for {}", settings.sheet.path_to_sheet.display());

    iced::application("EAN Review", App::update, App::view)
        .theme(|_| Theme::TokyoNight)
        .window(Settings {
            size: Size { width: 1280.0, height: 960.0 },
            min_size: Some(Size { width: 900.0, height: 600.0 }),
            resizable: true,
            decorations: true,
            position: window::Position::Centered,
            ..Default::default()
        })
        .run_with(move || App::new(settings, settings_path))
}
