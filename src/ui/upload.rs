/// File upload panel: picker button, selection stats, ordering control and
/// the thumbnail grid with per-image removal.

use crate::state::selection::{OrderingMode, Selection};
use crate::Message;
use iced::widget::{button, column, container, pick_list, row, text, Column, Row};
use iced::{Alignment, Element, Length};

const THUMBNAILS_PER_ROW: usize = 3;

pub fn panel(selection: &Selection, is_compressing: bool) -> Element<'_, Message> {
    let mut content = column![
        text("File Upload").size(28),
        button(text("Choose Files"))
            .on_press(Message::PickFiles)
            .width(Length::Fill),
        text("File Support: JPEG, PNG, GIF, BMP, TIFF, WEBP").size(13),
        text(format!(
            "{} Files, {} MB",
            selection.count(),
            selection.total_size_mb()
        ))
        .size(14),
    ]
    .spacing(12);

    if is_compressing {
        content = content.push(text("Optimizing previews…").size(14));
    }

    if !selection.is_empty() {
        content = content.push(
            row![
                text("Order").size(14),
                pick_list(
                    OrderingMode::ALL,
                    Some(selection.ordering()),
                    Message::OrderingSelected,
                ),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        );
        content = content.push(thumbnail_grid(selection));
        content = content.push(
            button(text("Clear All"))
                .on_press(Message::ClearAll)
                .width(Length::Fill),
        );
    }

    container(content).width(Length::FillPortion(1)).into()
}

fn thumbnail_grid(selection: &Selection) -> Element<'_, Message> {
    let mut grid: Column<'_, Message> = column![].spacing(8);
    for chunk in selection.images().chunks(THUMBNAILS_PER_ROW) {
        let mut line: Row<'_, Message> = row![].spacing(8);
        for image in chunk {
            line = line.push(
                column![
                    iced::widget::image(image.thumbnail.clone())
                        .width(Length::Fixed(88.0))
                        .height(Length::Fixed(66.0)),
                    button(text("Remove").size(11)).on_press(Message::RemoveImage(image.id)),
                ]
                .spacing(4)
                .align_x(Alignment::Center),
            );
        }
        grid = grid.push(line);
    }
    grid.into()
}
