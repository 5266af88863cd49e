//! A render surface that paints into the log.

use std::collections::HashMap;

use toastwin_bridge::MessageFromEngine;
use toastwin_bridge::render::{InstanceKey, Phase, RenderFrame};
use tokio::sync::mpsc::Receiver;

#[derive(Debug, Default)]
pub struct LogSurface {
    live: HashMap<InstanceKey, (u64, Phase)>,
}

impl LogSurface {
    /// Applies one engine message. Frames from an older generation than the
    /// one on screen are ignored.
    pub fn apply(&mut self, message: MessageFromEngine) {
        match message {
            MessageFromEngine::Render(frame) => self.paint(frame),
            MessageFromEngine::Dismissed { key, generation } => {
                if self.live.get(&key).is_some_and(|(live, _)| *live == generation) {
                    self.live.remove(&key);
                    log::info!("[{key}] dismissed ({} on screen)", self.live.len());
                }
            }
            MessageFromEngine::ConfigurationResponse(config) => {
                log::info!("Engine configuration: {config:?}");
            }
        }
    }

    fn paint(&mut self, frame: RenderFrame) {
        if self
            .live
            .get(&frame.key)
            .is_some_and(|(live, _)| *live > frame.generation)
        {
            return;
        }

        let previous = self.live.insert(frame.key.clone(), (frame.generation, frame.phase));
        let phase_changed = previous
            .is_none_or(|(generation, phase)| generation != frame.generation || phase != frame.phase);

        if phase_changed {
            let text = frame
                .title
                .as_deref()
                .or(frame.description.as_deref())
                .unwrap_or_default();
            log::info!(
                "[{}#{}] {:?} at {} {:?} {} \"{text}\"",
                frame.key,
                frame.generation,
                frame.phase,
                frame.position,
                frame.icon,
                frame.icon_color,
            );
            if let Some(animation) = frame.animation {
                let (from, to) = animation.to_css();
                log::debug!(
                    "[{}] {from} -> {to} over {}ms {}",
                    frame.key,
                    animation.duration_ms,
                    animation.easing
                );
            }
        } else if frame.show_countdown {
            log::trace!("[{}] {}% left", frame.key, frame.remaining_percent);
        }

        if frame.phase == Phase::Disposed {
            self.live.remove(&frame.key);
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

/// Paints engine messages until the engine closes its channel.
pub fn run(mut rx: Receiver<MessageFromEngine>) {
    let mut surface = LogSurface::default();
    while let Some(message) = rx.blocking_recv() {
        surface.apply(message);
    }
    log::info!("Engine closed, {} notification(s) left on screen", surface.live_count());
}

#[cfg(test)]
mod tests {
    use toastwin_bridge::notification::Position;
    use toastwin_bridge::render::{IconSource, IconVariant};

    use super::*;

    fn frame(key: &str, generation: u64, phase: Phase) -> RenderFrame {
        RenderFrame {
            key: InstanceKey::Named(key.into()),
            generation,
            title: Some("title".into()),
            description: None,
            description_only: false,
            icon: IconSource::Symbol("circle-info".into()),
            icon_animation: None,
            icon_color: "#9c27b0".into(),
            icon_variant: IconVariant::Light,
            title_color: "#9c27b0".into(),
            background: None,
            shadow_visible: false,
            content_visible: false,
            position: Position::TopRight,
            phase,
            remaining_percent: 100,
            show_countdown: true,
            animation: None,
            style_overrides: None,
        }
    }

    #[test]
    fn tracks_live_notifications() {
        let mut surface = LogSurface::default();
        surface.apply(MessageFromEngine::Render(frame("a", 0, Phase::IconReveal)));
        surface.apply(MessageFromEngine::Render(frame("b", 0, Phase::IconReveal)));
        assert_eq!(surface.live_count(), 2);

        surface.apply(MessageFromEngine::Render(frame("a", 0, Phase::Disposed)));
        assert_eq!(surface.live_count(), 1);
    }

    #[test]
    fn stale_dismissals_are_ignored() {
        let mut surface = LogSurface::default();
        surface.apply(MessageFromEngine::Render(frame("a", 1, Phase::IconReveal)));
        surface.apply(MessageFromEngine::Dismissed {
            key: InstanceKey::Named("a".into()),
            generation: 0,
        });
        assert_eq!(surface.live_count(), 1);

        surface.apply(MessageFromEngine::Render(frame("a", 0, Phase::CountingDown)));
        surface.apply(MessageFromEngine::Dismissed {
            key: InstanceKey::Named("a".into()),
            generation: 1,
        });
        assert_eq!(surface.live_count(), 0);
    }
}
