/// Configuration panel: canvas type and size, resolution, output format,
/// layout, spacing and the grid-fit recommendation.

use crate::api::grid::GridAdvice;
use crate::collage::params::{
    spacing_percent, CanvasType, CollageConfig, LayoutType, FORMAT_OPTIONS, RESOLUTION_OPTIONS,
};
use crate::Message;
use iced::widget::{
    button, checkbox, column, container, horizontal_space, pick_list, row, slider, text,
    text_input,
};
use iced::{Element, Length};

pub fn panel<'a>(
    config: &'a CollageConfig,
    grid_advice: Option<&'a GridAdvice>,
    photo_count: usize,
) -> Element<'a, Message> {
    let mut content = column![text("Configuration").size(28)].spacing(12);

    content = content.push(labeled(
        "Canvas Type",
        pick_list(
            CanvasType::ALL,
            Some(config.canvas_type),
            Message::CanvasTypeSelected,
        )
        .width(Length::Fill)
        .into(),
    ));

    let presets: Vec<String> = config
        .size_presets()
        .iter()
        .map(|preset| preset.to_string())
        .collect();
    content = content.push(labeled(
        "Size Presets",
        pick_list(
            presets,
            Some(config.size_preset.clone()),
            Message::PresetSelected,
        )
        .width(Length::Fill)
        .into(),
    ));

    if config.uses_custom_dimensions() {
        let unit = match config.canvas_type {
            CanvasType::Print => "mm",
            CanvasType::Digital => "px",
        };
        content = content.push(
            row![
                text_input(&format!("Width ({unit})"), &config.custom_width)
                    .on_input(Message::CustomWidthChanged),
                text_input(&format!("Height ({unit})"), &config.custom_height)
                    .on_input(Message::CustomHeightChanged),
            ]
            .spacing(8),
        );
    }

    if config.canvas_type == CanvasType::Print {
        let resolutions: Vec<String> = RESOLUTION_OPTIONS
            .iter()
            .map(|option| option.to_string())
            .collect();
        content = content.push(labeled(
            "Resolution",
            pick_list(
                resolutions,
                Some(config.resolution.clone()),
                Message::ResolutionSelected,
            )
            .width(Length::Fill)
            .into(),
        ));
    }

    let formats: Vec<String> = FORMAT_OPTIONS
        .iter()
        .map(|option| option.to_string())
        .collect();
    content = content.push(labeled(
        "Format",
        pick_list(formats, Some(config.format.clone()), Message::FormatSelected)
            .width(Length::Fill)
            .into(),
    ));

    if config.format.starts_with("PNG") {
        content = content.push(
            checkbox("Transparent Background", config.transparency)
                .on_toggle(Message::TransparencyToggled),
        );
    }

    content = content.push(labeled(
        "Layout",
        row![
            layout_button("Masonry", LayoutType::Masonry, config.layout),
            layout_button("Grid", LayoutType::Grid, config.layout),
        ]
        .spacing(8)
        .into(),
    ));

    content = content.push(
        column![
            row![
                text("Spacing").size(14),
                horizontal_space(),
                text(format!("{}%", spacing_percent(config.spacing))).size(12),
            ],
            slider(0.0..=0.3, config.spacing, Message::SpacingChanged).step(0.01),
        ]
        .spacing(4),
    );

    content = content.push(
        checkbox("Maintain Aspect Ratio", config.maintain_aspect_ratio)
            .on_toggle(|_| Message::MaintainAspectToggled),
    );

    if config.layout == LayoutType::Grid {
        content = content.push(grid_advice_section(grid_advice, photo_count));
    }

    container(content).width(Length::FillPortion(1)).into()
}

fn labeled<'a>(label: &'a str, input: Element<'a, Message>) -> Element<'a, Message> {
    column![text(label).size(14), input].spacing(4).into()
}

fn layout_button(label: &str, layout: LayoutType, current: LayoutType) -> Element<'_, Message> {
    let caption = if layout == current {
        format!("● {label}")
    } else {
        label.to_string()
    };
    button(text(caption))
        .on_press(Message::LayoutSelected(layout))
        .width(Length::Fill)
        .into()
}

/// Non-binding recommendation for grid layouts. The buttons act on the
/// suggestion; the user is free to ignore it and render anyway.
fn grid_advice_section<'a>(
    advice: Option<&'a GridAdvice>,
    photo_count: usize,
) -> Element<'a, Message> {
    let Some(advice) = advice else {
        return text("Grid Fit: checking…").size(13).into();
    };

    match advice.delta {
        Some(0) => text(format!(
            "Grid Fit: {} photos tile a perfect {}x{} grid",
            photo_count, advice.columns, advice.rows
        ))
        .size(13)
        .into(),
        Some(delta) if delta > 0 => column![
            text(format!(
                "Grid Fit: add {} photo(s) for a perfect {}x{} grid ({} total)",
                delta, advice.columns, advice.rows, advice.optimal_num_images
            ))
            .size(13),
            button(text(format!("Add {} More", delta)).size(13))
                .on_press(Message::PickFilesToAppend),
        ]
        .spacing(4)
        .into(),
        Some(delta) => column![
            text(format!(
                "Grid Fit: remove {} photo(s) for a perfect {}x{} grid ({} total)",
                -delta, advice.columns, advice.rows, advice.optimal_num_images
            ))
            .size(13),
            button(text(format!("Remove Last {}", -delta)).size(13))
                .on_press(Message::RemovePhotos((-delta) as usize)),
        ]
        .spacing(4)
        .into(),
        None => text(format!(
            "Grid Fit: {} photos do not tile evenly",
            photo_count
        ))
        .size(13)
        .into(),
    }
}
