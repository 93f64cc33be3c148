use iced::{Element, Task, Theme};
use tracing::info;

use super::{
    AppState, Message,
    screens::{Screen, ScreenData, ScreenMessage, landing_page::LandingPageScreen},
};
use crate::config::Config;

pub struct LiftSpecApp {
    state: AppState,
    screen: ScreenData,
}

fn unwrap_screen_message(message: ScreenMessage<ScreenData>) -> Message {
    match message {
        ScreenMessage::ScreenMessage(message) => message,
        ScreenMessage::ParentMessage(never) => match never {},
    }
}

impl LiftSpecApp {
    pub fn new(config: Config) -> (Self, Task<Message>) {
        info!(projects_dir = %config.projects_dir.display(), "starting wizard");
        let state = AppState::new(&config);
        let screen = ScreenData::LandingPage(LandingPageScreen::new(&state));
        (Self { state, screen }, Task::none())
    }

    pub fn title(&self) -> String {
        format!("Lift Design Toolbox - {}", self.state.project_name())
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        self.screen
            .update(message, &mut self.state)
            .map(unwrap_screen_message)
    }

    pub fn view(&self) -> Element<'_, Message> {
        self.screen.view().map(unwrap_screen_message)
    }

    pub fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// Open the wizard window and block until it is closed.
pub fn run(config: Config) -> anyhow::Result<()> {
    iced::application(
        move || LiftSpecApp::new(config.clone()),
        LiftSpecApp::update,
        LiftSpecApp::view,
    )
    .title(LiftSpecApp::title)
    .theme(LiftSpecApp::theme)
    .window_size((1280.0, 800.0))
    .run()?;
    Ok(())
}
