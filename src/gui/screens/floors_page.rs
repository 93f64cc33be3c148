use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{Column, button, column, container, row, scrollable, text},
};
use rfd::MessageLevel;
use tracing::{info, warn};

use crate::{
    core::{CellInput, FloorsStep, SaveFailed, StepId, WizardStep},
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
        widgets::{SAVE_AND_PROCEED, control_cell, dialog, layout},
    },
};

const INDEX_WIDTH: f32 = 70.0;
const CELL_WIDTH: f32 = 200.0;

/// Floor levels: one row per stop, grouped by lift.
#[derive(Debug, Clone)]
pub struct FloorsPageScreen {
    step: FloorsStep,
    project_name: String,
}

#[derive(Debug, Clone)]
pub enum FloorsPageMessage {
    CellEdited {
        field: usize,
        floor: usize,
        input: CellInput,
    },
    SaveAndProceed,
    None,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    Saved { file_name: String },
}

impl FloorsPageScreen {
    pub fn new(step: FloorsStep, project_name: String) -> Self {
        Self { step, project_name }
    }

    fn table(&self) -> Element<'_, ScreenMessage<Self>> {
        let grid = self.step.grid();

        let mut header = row![
            text("Lift").width(INDEX_WIDTH),
            text("Floor").width(INDEX_WIDTH),
        ]
        .spacing(10);
        for label in grid.labels() {
            header = header.push(text(label).width(CELL_WIDTH));
        }

        let mut rows = Column::new().spacing(6);
        for floor_row in self.step.rows() {
            let mut line = row![
                text(floor_row.lift.to_string()).width(INDEX_WIDTH),
                text(floor_row.floor.to_string()).width(INDEX_WIDTH),
            ]
            .spacing(10)
            .align_y(Center);
            for field in 0..grid.row_count() {
                if let Some(control) = grid.cell(field, floor_row.column) {
                    line = line.push(
                        container(control_cell(control, field, floor_row.column, edited))
                            .width(CELL_WIDTH),
                    );
                }
            }
            rows = rows.push(line);
        }

        scrollable(column![header, rows].spacing(10))
            .direction(scrollable::Direction::Both {
                vertical: scrollable::Scrollbar::default(),
                horizontal: scrollable::Scrollbar::default(),
            })
            .height(Length::Fill)
            .into()
    }
}

fn edited(field: usize, floor: usize, input: CellInput) -> ScreenMessage<FloorsPageScreen> {
    ScreenMessage::ScreenMessage(FloorsPageMessage::CellEdited {
        field,
        floor,
        input,
    })
}

fn closed() -> ScreenMessage<FloorsPageScreen> {
    ScreenMessage::ScreenMessage(FloorsPageMessage::None)
}

impl Screen for FloorsPageScreen {
    type Message = FloorsPageMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let content = column![
            text(StepId::Floors.to_string()).size(24),
            self.table(),
            button(text(SAVE_AND_PROCEED))
                .on_press(ScreenMessage::ScreenMessage(FloorsPageMessage::SaveAndProceed)),
        ]
        .spacing(20)
        .padding(10);

        layout(&self.project_name, content, StepId::Floors)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            FloorsPageMessage::CellEdited {
                field,
                floor,
                input,
            } => {
                self.step.edit(floor, field, input);
                Task::none()
            }
            FloorsPageMessage::SaveAndProceed => {
                let Some(session) = state.session.take() else {
                    return dialog(MessageLevel::Error, "Error", "No project is open.", closed());
                };
                match self.step.save_and_proceed(session, &state.store) {
                    Ok(handoff) => {
                        info!(path = %handoff.saved_to.display(), "floors saved");
                        let file_name = handoff
                            .saved_to
                            .file_name()
                            .map(|name| name.to_string_lossy().into_owned())
                            .unwrap_or_else(|| handoff.saved_to.display().to_string());
                        state.session = Some(handoff.state);
                        Task::done(ScreenMessage::ParentMessage(ParentMessage::Saved {
                            file_name,
                        }))
                    }
                    Err(SaveFailed { state: session, source }) => {
                        warn!(error = %source, "save failed");
                        state.session = Some(session);
                        dialog(
                            MessageLevel::Error,
                            "Error",
                            format!("Failed to save data: {source}"),
                            closed(),
                        )
                    }
                }
            }
            FloorsPageMessage::None => Task::none(),
        }
    }
}
