//! Timed phase sequence and countdown of a single notification instance.
//!
//! [`LifecycleController`] is a pure state machine over time offsets from
//! the instance's creation; [`drive`] is the task that sleeps until each
//! deadline and turns the controller's steps into render frames.

use std::time::Duration;

use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use toastwin_bridge::MessageFromEngine;
use toastwin_bridge::render::{AnimationDescriptor, InstanceKey, Phase, RenderFrame, Transition};

use crate::animation;
use crate::app::AppContext;
use crate::defaults::{self, ResolvedRequest};
use crate::registry::Lease;
use crate::services::AppContextHandle;

/// Delay before the background starts expanding, after the icon slid in.
pub const BACKGROUND_DELAY_MS: u64 = 500;
/// Time the background takes to expand fully.
pub const BACKGROUND_EXPANSION_MS: u64 = 300;
/// Delay before title, description and countdown ring appear.
pub const CONTENT_DELAY_MS: u64 = 800;
/// Number of decrements from 100% to 0%.
pub const COUNTDOWN_STEPS: u8 = 100;

/// Reveal phases and their offsets from creation, in entry order.
const REVEAL_SCHEDULE: [(Phase, Duration); 4] = [
    (
        Phase::BackgroundReveal,
        Duration::from_millis(BACKGROUND_DELAY_MS),
    ),
    (
        Phase::ShadowReveal,
        Duration::from_millis(BACKGROUND_DELAY_MS + BACKGROUND_EXPANSION_MS),
    ),
    (Phase::ContentReveal, Duration::from_millis(CONTENT_DELAY_MS)),
    (Phase::CountingDown, Duration::from_millis(CONTENT_DELAY_MS)),
];

/// A live notification: resolved request plus the visual state the render
/// surface needs.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationInstance {
    pub key: InstanceKey,
    pub generation: u64,
    pub phase: Phase,
    pub remaining_percent: u8,
    pub background_expanded: bool,
    pub shadow_visible: bool,
    pub content_visible: bool,
    pub resolved: ResolvedRequest,
}

impl NotificationInstance {
    /// Snapshot of the instance for the render surface.
    pub fn frame(&self, animation: Option<AnimationDescriptor>) -> RenderFrame {
        let resolved = &self.resolved;
        RenderFrame {
            key: self.key.clone(),
            generation: self.generation,
            title: resolved.title.clone(),
            description: resolved.description.clone(),
            description_only: resolved.title.is_none() && resolved.description.is_some(),
            icon: resolved.icon.clone(),
            icon_animation: resolved.icon_animation.clone(),
            icon_color: resolved.icon_color.clone(),
            icon_variant: resolved.icon_variant,
            title_color: defaults::title_color(resolved.category),
            background: self
                .background_expanded
                .then(|| defaults::background_gradient(resolved.category)),
            shadow_visible: self.shadow_visible,
            content_visible: self.content_visible,
            position: resolved.position,
            phase: self.phase,
            remaining_percent: self.remaining_percent,
            show_countdown: resolved.show_countdown,
            animation,
            style_overrides: resolved.style_overrides.clone(),
        }
    }
}

/// One observable change produced by [`LifecycleController::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Entered(Phase),
    Countdown(u8),
}

#[derive(Debug)]
pub struct LifecycleController {
    instance: NotificationInstance,
    tick_interval: Duration,
    ticks: u32,
    exit_started: Option<Duration>,
    exit_duration: Duration,
}

impl LifecycleController {
    /// Creates the controller in [`Phase::IconReveal`] with a full countdown.
    pub fn new(key: InstanceKey, generation: u64, resolved: ResolvedRequest) -> Self {
        let tick_interval = Duration::from_micros(
            resolved.duration_ms.saturating_mul(1000) / u64::from(COUNTDOWN_STEPS),
        );
        let exit_duration = Duration::from_millis(
            animation::describe(resolved.position, Transition::Exit).duration_ms,
        );

        Self {
            instance: NotificationInstance {
                key,
                generation,
                phase: Phase::IconReveal,
                remaining_percent: COUNTDOWN_STEPS,
                background_expanded: false,
                shadow_visible: false,
                content_visible: false,
                resolved,
            },
            tick_interval,
            ticks: 0,
            exit_started: None,
            exit_duration,
        }
    }

    pub fn instance(&self) -> &NotificationInstance {
        &self.instance
    }

    pub fn phase(&self) -> Phase {
        self.instance.phase
    }

    /// Offset from creation at which the next step is due, or `None` once
    /// the instance is disposed.
    pub fn next_deadline(&self) -> Option<Duration> {
        [
            self.next_reveal().map(|(_, due)| due),
            self.next_tick(),
            self.exit_entry(),
            self.exit_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Applies the earliest step due at or before `elapsed`, if any.
    ///
    /// Steps sharing a deadline come out as reveal, countdown, exit,
    /// disposal.
    pub fn poll_step(&mut self, elapsed: Duration) -> Option<Step> {
        let deadline = self.next_deadline().filter(|due| *due <= elapsed)?;

        if let Some((phase, _)) = self.next_reveal().filter(|(_, due)| *due <= deadline) {
            return Some(self.enter(phase));
        }

        if self.next_tick().is_some_and(|due| due <= deadline) {
            self.ticks += 1;
            self.instance.remaining_percent = self.instance.remaining_percent.saturating_sub(1);
            if self.instance.remaining_percent == 0 {
                self.exit_started = Some(deadline);
            }
            return Some(Step::Countdown(self.instance.remaining_percent));
        }

        if self.exit_entry().is_some() {
            return Some(self.enter(Phase::Exiting));
        }

        Some(self.enter(Phase::Disposed))
    }

    /// Applies every step due at or before `elapsed`, in time order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Step> {
        std::iter::from_fn(|| self.poll_step(elapsed)).collect()
    }

    fn enter(&mut self, phase: Phase) -> Step {
        debug_assert!(phase > self.instance.phase, "phases only move forward");
        match phase {
            Phase::BackgroundReveal => self.instance.background_expanded = true,
            Phase::ShadowReveal => self.instance.shadow_visible = true,
            Phase::ContentReveal => self.instance.content_visible = true,
            _ => {}
        }
        self.instance.phase = phase;
        Step::Entered(phase)
    }

    /// Reveal phases are skipped once the countdown has run out.
    fn next_reveal(&self) -> Option<(Phase, Duration)> {
        if self.exit_started.is_some() {
            return None;
        }
        REVEAL_SCHEDULE
            .into_iter()
            .find(|(phase, _)| *phase > self.instance.phase)
    }

    fn next_tick(&self) -> Option<Duration> {
        (self.instance.remaining_percent > 0).then(|| self.tick_interval * (self.ticks + 1))
    }

    fn exit_entry(&self) -> Option<Duration> {
        self.exit_started.filter(|_| self.instance.phase < Phase::Exiting)
    }

    fn exit_deadline(&self) -> Option<Duration> {
        if self.instance.phase != Phase::Exiting {
            return None;
        }
        self.exit_started.map(|started| started + self.exit_duration)
    }
}

/// Runs `controller` to completion against the clock, starting from
/// `created_at`.
///
/// Deadlines are absolute offsets from `created_at`, so a late wake-up never
/// reorders phases. Once the lease is cancelled the task stops without
/// emitting anything else.
pub(crate) async fn drive(
    context: AppContextHandle,
    mut controller: LifecycleController,
    lease: Lease,
    created_at: Instant,
) {
    let Lease {
        key,
        generation,
        cancel,
        ..
    } = lease;
    let position = controller.instance().resolved.position;
    log::info!(
        "Showing notification {key} (generation {generation}) at {position} for {}ms",
        controller.instance().resolved.duration_ms
    );

    let entrance = animation::describe(position, Transition::Enter);
    if !emit(&context, &cancel, controller.instance().frame(Some(entrance))).await {
        return;
    }

    while let Some(deadline) = controller.next_deadline() {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::debug!("Notification {key} (generation {generation}) cancelled");
                return;
            }
            _ = time::sleep_until(created_at + deadline) => {}
        }

        let elapsed = created_at.elapsed();
        while let Some(step) = controller.poll_step(elapsed) {
            let animation = match step {
                Step::Entered(Phase::Disposed) => continue,
                Step::Entered(Phase::Exiting) => {
                    Some(animation::describe(position, Transition::Exit))
                }
                Step::Entered(phase) => {
                    log::debug!("Notification {key} entered {phase:?}");
                    None
                }
                Step::Countdown(_) => None,
            };
            if !emit(&context, &cancel, controller.instance().frame(animation)).await {
                return;
            }
        }
    }

    let released = context.state.write().await.registry.release(&key, generation);
    if !released || cancel.is_cancelled() {
        return;
    }

    log::info!("Notification {key} (generation {generation}) disposed");
    context
        .send(MessageFromEngine::Render(controller.instance().frame(None)))
        .await;
    context
        .send(MessageFromEngine::Dismissed { key, generation })
        .await;
}

/// Sends `frame` unless the instance is cancelled first. Returns `false` if
/// the instance has been cancelled.
async fn emit(context: &AppContext, cancel: &CancellationToken, frame: RenderFrame) -> bool {
    if cancel.is_cancelled() {
        return false;
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        _ = context.send(MessageFromEngine::Render(frame)) => true,
    }
}
