// SPDX-License-Identifier: MPL-2.0
//! Message routing and handling of the effects widgets hand back.

use super::{content_width, App, Message};
use crate::media;
use crate::ui::{scroller, toggler, viewer};
use iced::Task;

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Viewer(message) => {
                let (effect, task) = self.viewer.handle_message(message);
                let effect_task = self.handle_viewer_effect(effect);
                Task::batch([task.map(Message::Viewer), effect_task])
            }
            Message::Scroller { index, message } => {
                let Some(scroller) = self.scrollers.get_mut(index) else {
                    tracing::warn!(index, "message for unknown scroller");
                    return Task::none();
                };
                let (effect, task) = scroller.handle_message(message);
                match effect {
                    scroller::Effect::Scrolled { offset } => {
                        tracing::trace!(index, offset, "scroller moved");
                    }
                    scroller::Effect::Relayout { created } => {
                        tracing::debug!(index, created, "scroller relaid out");
                    }
                    scroller::Effect::None => {}
                }
                task.map(move |message| Message::Scroller { index, message })
            }
            Message::Toggler { index, message } => {
                let Some(toggler) = self.togglers.get_mut(index) else {
                    tracing::warn!(index, "message for unknown toggler");
                    return Task::none();
                };
                let (effect, task) = toggler.handle_message(message);
                if effect != toggler::Effect::None {
                    tracing::debug!(index, ?effect, "toggler finished transition");
                }
                task.map(move |message| Message::Toggler { index, message })
            }
            Message::ThumbnailLoaded { url, result } => {
                match result {
                    Ok(image) => {
                        self.thumbnails.insert(url, image.handle);
                    }
                    Err(err) => tracing::warn!(%url, "thumbnail not loaded: {err}"),
                }
                Task::none()
            }
            Message::WindowResized(size) => {
                self.window_size = size;
                self.viewer.set_viewport(size);
                let container_width = content_width(size.width);
                Task::batch(self.scrollers.iter_mut().enumerate().map(|(index, scroller)| {
                    let (_, task) = scroller.handle_message(scroller::Message::Resized {
                        window_width: size.width,
                        container_width,
                    });
                    task.map(move |message| Message::Scroller { index, message })
                }))
            }
            Message::DownloadTargetChosen { url, path } => match path {
                Some(path) => Task::perform(media::save_to(url, path), Message::DownloadFinished),
                None => Task::none(),
            },
            Message::DownloadFinished(result) => {
                self.status = Some(match result {
                    Ok(path) => {
                        let path = path.display().to_string();
                        self.i18n
                            .tr_with_args("notification-download-saved", &[("path", path.as_str())])
                    }
                    Err(err) => {
                        tracing::error!("download failed: {err}");
                        self.i18n.tr(err.i18n_key())
                    }
                });
                Task::none()
            }
            Message::DismissStatus => {
                self.status = None;
                Task::none()
            }
        }
    }

    fn handle_viewer_effect(&mut self, effect: viewer::Effect) -> Task<Message> {
        match effect {
            viewer::Effect::None => Task::none(),
            viewer::Effect::LockPageScroll => {
                self.page_scroll_locked = true;
                Task::none()
            }
            viewer::Effect::UnlockPageScroll => {
                self.page_scroll_locked = false;
                Task::none()
            }
            viewer::Effect::Download { url } => {
                let file_name = media::fetch::file_name(&url);
                Task::perform(
                    async move {
                        rfd::AsyncFileDialog::new()
                            .set_file_name(&file_name)
                            .save_file()
                            .await
                            .map(|handle| handle.path().to_path_buf())
                    },
                    move |path| Message::DownloadTargetChosen { url, path },
                )
            }
            viewer::Effect::OpenLink { url } => {
                if let Err(err) = open::that(&url) {
                    tracing::warn!(%url, "failed to open link: {err}");
                }
                Task::none()
            }
            viewer::Effect::LoadFailed { url, error } => {
                tracing::debug!(%url, "viewer load failed");
                self.status = Some(self.i18n.tr(error.i18n_key()));
                Task::none()
            }
        }
    }
}
