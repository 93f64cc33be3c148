use iced::{
    Element, Length, Task,
    widget::{checkbox, column, container, pick_list, row, text, text_input},
};
use rfd::{AsyncMessageDialog, MessageButtons, MessageLevel};

use crate::core::{CellInput, Control, StepId};

/// Label of the button that saves a step and moves on.
pub const SAVE_AND_PROCEED: &str = "Save and Proceed";

/// Sidebar entry style relative to the step being edited.
fn step_style(current: StepId, step: StepId) -> fn(&iced::Theme) -> container::Style {
    if step == current {
        container::bordered_box
    } else if step < current {
        container::rounded_box
    } else {
        container::transparent
    }
}

/// Page frame: project name and step list on the left, the page on the right.
pub fn layout<'a, Message>(
    project_name: &'a str,
    main_content: impl Into<Element<'a, Message>>,
    current: StepId,
) -> Element<'a, Message>
where
    Message: 'a,
{
    let steps = StepId::ALL.into_iter().map(|step| {
        container(text(step.to_string()))
            .style(step_style(current, step))
            .width(Length::Fill)
            .padding(10)
            .into()
    });

    container(row![
        container(column![
            container(text(project_name).size(18)).padding(10),
            column(steps).spacing(4),
        ])
        .width(Length::FillPortion(1)),
        container(main_content.into())
            .width(Length::FillPortion(4))
            .padding(10),
    ])
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}

/// Input widget for one grid cell. `wrap` turns an edit of `(field, entity)` into
/// the page's message.
pub fn control_cell<'a, Message>(
    control: &'a Control,
    field: usize,
    entity: usize,
    wrap: fn(usize, usize, CellInput) -> Message,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    match control {
        Control::Text(value) => text_input("", value)
            .on_input(move |s| wrap(field, entity, CellInput::Text(s)))
            .into(),
        Control::Numeric(value) => text_input("0.0", value)
            .on_input(move |s| wrap(field, entity, CellInput::Text(s)))
            .into(),
        Control::Select { options, selected } => {
            let options: &'static [&'static str] = *options;
            pick_list(options, options.get(*selected).copied(), move |choice| {
                let index = options
                    .iter()
                    .position(|option| *option == choice)
                    .unwrap_or_default();
                wrap(field, entity, CellInput::Choice(index))
            })
            .width(Length::Fill)
            .into()
        }
        Control::Toggle(on) => checkbox(*on)
            .on_toggle(move |checked| wrap(field, entity, CellInput::Checked(checked)))
            .into(),
        Control::MultiSelect { options, checked } => row(options.iter().zip(checked).enumerate().map(
            |(index, (option, on))| {
                checkbox(*on)
                    .label(*option)
                    .on_toggle(move |checked| {
                        wrap(field, entity, CellInput::OptionChecked { index, checked })
                    })
                    .into()
            },
        ))
        .spacing(10)
        .into(),
    }
}

/// Blocking-style message box, resolved to `done` once dismissed.
pub fn dialog<T>(
    level: MessageLevel,
    title: &str,
    description: impl Into<String>,
    done: T,
) -> Task<T>
where
    T: Clone + Send + 'static,
{
    let show = AsyncMessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::Ok)
        .show();
    Task::perform(show, move |_| done.clone())
}
