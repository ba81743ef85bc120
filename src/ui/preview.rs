/// Preview panel: the server-rendered collage, request status, and the
/// render job's progress and download controls.

use crate::{JobPhase, Message, PreviewStatus};
use iced::widget::image::Handle;
use iced::widget::{button, column, container, progress_bar, row, text};
use iced::{Element, Length};

pub fn panel<'a>(
    status: &'a PreviewStatus,
    preview: Option<&'a Handle>,
    job: &'a JobPhase,
    job_error: Option<&'a str>,
    job_notice: Option<&'a str>,
    can_request: bool,
) -> Element<'a, Message> {
    let frame: Element<'a, Message> = match preview {
        Some(handle) => iced::widget::image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(360.0))
            .into(),
        None => container(text("Preview").size(20))
            .width(Length::Fill)
            .height(Length::Fixed(360.0))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    let status_label = match status {
        PreviewStatus::Idle => "Idle",
        PreviewStatus::Loading => "Loading",
        PreviewStatus::Ready => "Ready",
        PreviewStatus::Error(_) => "Error",
    };

    let mut content = column![
        text("Collage Preview").size(28),
        frame,
        text(format!("Status: {status_label}")).size(14),
    ]
    .spacing(12);

    if let PreviewStatus::Error(message) = status {
        content = content.push(text(message.clone()).size(13));
    }

    match job {
        JobPhase::Idle => {
            if let Some(error) = job_error {
                content = content.push(text(format!("Render failed: {error}")).size(13));
            }
            if let Some(notice) = job_notice {
                content = content.push(text(notice.to_string()).size(13));
            }
        }
        JobPhase::Pending { .. } => {
            content = content.push(text("Submitting render job…").size(14));
            content = content.push(progress_bar(0.0..=100.0, 0.0));
        }
        JobPhase::Processing { progress, .. } => {
            content = content.push(text(format!("Rendering… {progress}%")).size(14));
            content = content.push(progress_bar(0.0..=100.0, f32::from(*progress)));
        }
    }

    let job_idle = matches!(job, JobPhase::Idle);
    content = content.push(
        row![
            button(text("Preview"))
                .on_press_maybe(can_request.then_some(Message::RequestPreviewNow)),
            button(text("Download"))
                .on_press_maybe((can_request && job_idle).then_some(Message::DownloadRequested)),
        ]
        .spacing(12),
    );

    container(content).width(Length::FillPortion(1)).into()
}
