use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{Column, button, column, container, row, scrollable, text, text_input},
};
use rfd::MessageLevel;
use tracing::warn;

use crate::{
    core::{RecentProject, SessionState, StoreError},
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
        widgets::dialog,
    },
};

/// Project selection: recent files plus a name field for new projects.
#[derive(Debug, Clone)]
pub struct LandingPageScreen {
    recent: Vec<RecentProject>,
    selected: Option<usize>,
    new_name: String,
}

#[derive(Debug, Clone)]
pub enum LandingPageMessage {
    Select(usize),
    NameChanged(String),
    CreateProject,
    OpenProject,
    Refresh,
    None,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    ProjectOpened(SessionState),
}

impl LandingPageScreen {
    pub fn new(state: &AppState) -> Self {
        Self {
            recent: load_recent(state),
            selected: None,
            new_name: String::new(),
        }
    }
}

fn load_recent(state: &AppState) -> Vec<RecentProject> {
    state.store.list_recent().unwrap_or_else(|e| {
        warn!(error = %e, "could not list projects");
        Vec::new()
    })
}

fn notify(level: MessageLevel, title: &str, description: String) -> Task<ScreenMessage<LandingPageScreen>> {
    dialog(
        level,
        title,
        description,
        ScreenMessage::ScreenMessage(LandingPageMessage::None),
    )
}

impl Screen for LandingPageScreen {
    type Message = LandingPageMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let header = row![
            text("Project Name").width(Length::FillPortion(2)),
            text("Created").width(Length::FillPortion(1)),
            text("Modified").width(Length::FillPortion(1)),
        ]
        .spacing(10);

        let rows = self.recent.iter().enumerate().map(|(i, project)| {
            let style = if self.selected == Some(i) {
                button::primary
            } else {
                button::secondary
            };
            button(
                row![
                    text(project.name.as_str()).width(Length::FillPortion(2)),
                    text(project.created_label()).width(Length::FillPortion(1)),
                    text(project.modified_label()).width(Length::FillPortion(1)),
                ]
                .spacing(10),
            )
            .style(style)
            .width(Length::Fill)
            .on_press(ScreenMessage::ScreenMessage(LandingPageMessage::Select(i)))
            .into()
        });

        let content = column![
            text("Lift Designer").size(32),
            text("Recent Files").size(18),
            header,
            scrollable(Column::with_children(rows).spacing(4)).height(Length::Fill),
            row![
                text_input("New project name", &self.new_name)
                    .on_input(|name| ScreenMessage::ScreenMessage(LandingPageMessage::NameChanged(name)))
                    .on_submit(ScreenMessage::ScreenMessage(LandingPageMessage::CreateProject)),
                button(text("Create New"))
                    .on_press(ScreenMessage::ScreenMessage(LandingPageMessage::CreateProject)),
                button(text("Open File"))
                    .on_press(ScreenMessage::ScreenMessage(LandingPageMessage::OpenProject)),
                button(text("Refresh"))
                    .on_press(ScreenMessage::ScreenMessage(LandingPageMessage::Refresh)),
            ]
            .spacing(10)
            .align_y(Center),
        ]
        .spacing(20)
        .padding(20);

        container(content)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            LandingPageMessage::Select(i) => {
                self.selected = Some(i);
                Task::none()
            }
            LandingPageMessage::NameChanged(name) => {
                self.new_name = name;
                Task::none()
            }
            LandingPageMessage::CreateProject => match state.store.new_project(&self.new_name) {
                Ok(session) => Task::done(ScreenMessage::ParentMessage(
                    ParentMessage::ProjectOpened(session),
                )),
                Err(StoreError::AlreadyExists(_)) => notify(
                    MessageLevel::Warning,
                    "Warning",
                    "A project with this name already exists.".to_string(),
                ),
                Err(e) => notify(MessageLevel::Warning, "Warning", e.to_string()),
            },
            LandingPageMessage::OpenProject => {
                let Some(project) = self.selected.and_then(|i| self.recent.get(i)) else {
                    return notify(
                        MessageLevel::Info,
                        "Open Project",
                        "Select a project from the list first.".to_string(),
                    );
                };
                match state.store.load(&project.path) {
                    Ok(session) => Task::done(ScreenMessage::ParentMessage(
                        ParentMessage::ProjectOpened(session),
                    )),
                    Err(e) => {
                        warn!(error = %e, "could not open project");
                        self.recent = load_recent(state);
                        self.selected = None;
                        notify(MessageLevel::Error, "Error", e.to_string())
                    }
                }
            }
            LandingPageMessage::Refresh => {
                self.recent = load_recent(state);
                self.selected = None;
                Task::none()
            }
            LandingPageMessage::None => Task::none(),
        }
    }
}
