use crate::gui::screens::{
    ScreenData, ScreenMessage, floors_page::FloorsPageScreen, landing_page::LandingPageScreen,
    step_page::StepPageScreen,
};

#[derive(Debug, Clone)]
pub enum Message {
    LandingPage(ScreenMessage<LandingPageScreen>),
    StepPage(ScreenMessage<StepPageScreen>),
    FloorsPage(ScreenMessage<FloorsPageScreen>),
    ChangeScreen(ScreenData),
    DialogClosed,
}
