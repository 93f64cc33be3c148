use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{Column, button, column, container, row, scrollable, text},
};
use rfd::MessageLevel;
use tracing::{info, warn};

use crate::{
    core::{CellInput, Grid, GridStep, SaveFailed, StepId, WizardStep},
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
        widgets::{SAVE_AND_PROCEED, control_cell, dialog, layout},
    },
};

const LABEL_WIDTH: f32 = 220.0;
const CELL_WIDTH: f32 = 200.0;

/// One of the per-lift table pages.
#[derive(Debug, Clone)]
pub struct StepPageScreen {
    step: GridStep,
    project_name: String,
}

#[derive(Debug, Clone)]
pub enum StepPageMessage {
    CellEdited {
        row: usize,
        col: usize,
        input: CellInput,
    },
    AddLift,
    RemoveLift,
    SaveAndProceed,
    None,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    Saved { next: Option<StepId> },
}

impl StepPageScreen {
    pub fn new(step: GridStep, project_name: String) -> Self {
        Self { step, project_name }
    }

    fn table(&self) -> Element<'_, ScreenMessage<Self>> {
        let grid = self.step.grid();

        let mut header = row![text("Field").width(LABEL_WIDTH)].spacing(10);
        for col in 0..grid.column_count() {
            header = header.push(text(Grid::column_header(col)).width(CELL_WIDTH));
        }

        let mut rows = Column::new().spacing(6);
        for (field, label) in grid.labels().enumerate() {
            let mut line = row![text(label).width(LABEL_WIDTH)]
                .spacing(10)
                .align_y(Center);
            for entity in 0..grid.column_count() {
                if let Some(control) = grid.cell(field, entity) {
                    line = line.push(
                        container(control_cell(control, field, entity, edited)).width(CELL_WIDTH),
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

fn edited(row: usize, col: usize, input: CellInput) -> ScreenMessage<StepPageScreen> {
    ScreenMessage::ScreenMessage(StepPageMessage::CellEdited { row, col, input })
}

fn closed() -> ScreenMessage<StepPageScreen> {
    ScreenMessage::ScreenMessage(StepPageMessage::None)
}

impl Screen for StepPageScreen {
    type Message = StepPageMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let id = self.step.id();

        let mut actions = row![].spacing(10);
        if id.allows_resize() {
            actions = actions
                .push(
                    button(text("Add Lift"))
                        .on_press(ScreenMessage::ScreenMessage(StepPageMessage::AddLift)),
                )
                .push(
                    button(text("Remove Lift"))
                        .style(button::secondary)
                        .on_press_maybe((self.step.grid().column_count() > 1).then_some(
                            ScreenMessage::ScreenMessage(StepPageMessage::RemoveLift),
                        )),
                );
        }
        actions = actions.push(
            button(text(SAVE_AND_PROCEED))
                .on_press(ScreenMessage::ScreenMessage(StepPageMessage::SaveAndProceed)),
        );

        let content = column![text(id.to_string()).size(24), self.table(), actions]
            .spacing(20)
            .padding(10);

        layout(&self.project_name, content, id)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            StepPageMessage::CellEdited { row, col, input } => {
                self.step.edit(row, col, input);
                Task::none()
            }
            StepPageMessage::AddLift => {
                if let Err(e) = self.step.add_lift() {
                    warn!(error = %e, "cannot add lift");
                }
                Task::none()
            }
            StepPageMessage::RemoveLift => {
                if let Err(e) = self.step.remove_lift() {
                    warn!(error = %e, "cannot remove lift");
                }
                Task::none()
            }
            StepPageMessage::SaveAndProceed => {
                let Some(session) = state.session.take() else {
                    return dialog(
                        MessageLevel::Error,
                        "Error",
                        "No project is open.",
                        closed(),
                    );
                };
                match self.step.save_and_proceed(session, &state.store) {
                    Ok(handoff) => {
                        info!(
                            step = self.step.id().section_name(),
                            path = %handoff.saved_to.display(),
                            "step saved"
                        );
                        state.session = Some(handoff.state);
                        Task::done(ScreenMessage::ParentMessage(ParentMessage::Saved {
                            next: handoff.next,
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
            StepPageMessage::None => Task::none(),
        }
    }
}
