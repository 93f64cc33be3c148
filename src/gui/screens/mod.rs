pub mod floors_page;
pub mod landing_page;
pub mod step_page;

use iced::{Element, Task};
use rfd::MessageLevel;
use tracing::warn;

use crate::{
    core::{StepId, StepPage},
    gui::{AppState, Message, widgets::dialog},
};

#[derive(Debug, Clone)]
pub enum ScreenMessage<S: Screen> {
    ScreenMessage(S::Message),
    ParentMessage(S::ParentMessage),
}

pub trait Screen: Sized {
    type Message: std::fmt::Debug;
    type ParentMessage: std::fmt::Debug;
    fn view(&self) -> Element<'_, ScreenMessage<Self>>;
    fn update(&mut self, message: Self::Message, state: &mut AppState)
    -> Task<ScreenMessage<Self>>;
}

#[derive(Debug, Clone)]
pub enum ScreenData {
    LandingPage(landing_page::LandingPageScreen),
    StepPage(step_page::StepPageScreen),
    FloorsPage(floors_page::FloorsPageScreen),
}

/// Build the page for `step` from the open project and switch to it.
/// Stop count warnings of the floors page are shown once it is visible.
fn open_step(step: StepId, state: &AppState) -> Task<ScreenMessage<ScreenData>> {
    let Some(session) = state.session.as_ref() else {
        return Task::none();
    };
    let project_name = state.project_name();
    match StepPage::open(step, session) {
        Ok(StepPage::Grid(grid_step)) => change_screen(ScreenData::StepPage(
            step_page::StepPageScreen::new(grid_step, project_name),
        )),
        Ok(StepPage::Floors(floors_step)) => {
            let warnings = floors_step
                .warnings()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            let switch = change_screen(ScreenData::FloorsPage(
                floors_page::FloorsPageScreen::new(floors_step, project_name),
            ));
            if warnings.is_empty() {
                switch
            } else {
                switch.chain(
                    dialog(
                        MessageLevel::Warning,
                        "Invalid Input",
                        warnings.join("\n"),
                        Message::DialogClosed,
                    )
                    .map(ScreenMessage::ScreenMessage),
                )
            }
        }
        Err(e) => {
            warn!(error = %e, "could not open step");
            dialog(
                MessageLevel::Error,
                "Error",
                e.to_string(),
                Message::DialogClosed,
            )
            .map(ScreenMessage::ScreenMessage)
        }
    }
}

fn change_screen(screen: ScreenData) -> Task<ScreenMessage<ScreenData>> {
    Task::done(ScreenMessage::ScreenMessage(Message::ChangeScreen(screen)))
}

impl Screen for ScreenData {
    type Message = Message;
    type ParentMessage = std::convert::Infallible;
    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        match self {
            ScreenData::LandingPage(screen) => screen.view().map(Message::LandingPage),
            ScreenData::StepPage(screen) => screen.view().map(Message::StepPage),
            ScreenData::FloorsPage(screen) => screen.view().map(Message::FloorsPage),
        }
        .map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match (self, message) {
            (x, Message::ChangeScreen(screen)) => {
                *x = screen;
                Task::none()
            }
            (_, Message::DialogClosed) => Task::none(),
            (ScreenData::LandingPage(page), Message::LandingPage(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::LandingPage)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(landing_page::ParentMessage::ProjectOpened(
                    session,
                )) => {
                    state.session = Some(session);
                    open_step(StepId::BuildingSystems, state)
                }
            },
            (ScreenData::StepPage(page), Message::StepPage(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::StepPage)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(step_page::ParentMessage::Saved { next }) => {
                    match next {
                        Some(next) => open_step(next, state),
                        None => Task::none(),
                    }
                }
            },
            (ScreenData::FloorsPage(page), Message::FloorsPage(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::FloorsPage)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(floors_page::ParentMessage::Saved { file_name }) => {
                    dialog(
                        MessageLevel::Info,
                        "Success",
                        format!("File successfully saved as:\n{file_name}"),
                        Message::DialogClosed,
                    )
                    .map(ScreenMessage::ScreenMessage)
                }
            },
            _ => Task::none(),
        }
    }
}
