use std::time::Duration;

use tokio::sync::mpsc::{Receiver, Sender};
use tokio::time::{self, Instant};
use toastwin_bridge::config::Config;
use toastwin_bridge::notification::{Category, NotificationRequest, Position};
use toastwin_bridge::render::{
    Axis, Distance, IconSource, InstanceKey, Phase, RenderFrame, Transition,
};
use toastwin_bridge::{BridgeChannels, MessageFromEngine, MessageToEngine};
use toastwin_engine::animation;

/// Something the surface received, stamped with its offset from the start of
/// the test.
#[derive(Debug)]
enum Seen {
    Frame(Duration, RenderFrame),
    Dismissed(Duration, InstanceKey, u64),
}

fn spawn_engine() -> (Sender<MessageToEngine>, Receiver<MessageFromEngine>) {
    let channels = BridgeChannels::default();
    tokio::spawn(toastwin_engine::serve(
        Config::default(),
        channels.engine_rx,
        channels.engine_tx,
    ));
    (channels.surface_tx, channels.surface_rx)
}

/// Receives until the engine closes its channel.
async fn collect(start: Instant, rx: &mut Receiver<MessageFromEngine>) -> Vec<Seen> {
    let mut seen = Vec::new();
    while let Some(message) = rx.recv().await {
        let at = start.elapsed();
        match message {
            MessageFromEngine::Render(frame) => seen.push(Seen::Frame(at, frame)),
            MessageFromEngine::Dismissed { key, generation } => {
                seen.push(Seen::Dismissed(at, key, generation))
            }
            MessageFromEngine::ConfigurationResponse(_) => {}
        }
    }
    seen
}

fn frames(seen: &[Seen]) -> Vec<(Duration, &RenderFrame)> {
    seen.iter()
        .filter_map(|seen| match seen {
            Seen::Frame(at, frame) => Some((*at, frame)),
            Seen::Dismissed(..) => None,
        })
        .collect()
}

fn phase_entries(seen: &[Seen]) -> Vec<(Duration, Phase)> {
    let mut entries: Vec<(Duration, Phase)> = Vec::new();
    for (at, frame) in frames(seen) {
        if entries.last().map(|(_, phase)| *phase) != Some(frame.phase) {
            entries.push((at, frame.phase));
        }
    }
    entries
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[tokio::test(start_paused = true)]
async fn success_notification_runs_the_full_schedule() {
    let (tx, mut rx) = spawn_engine();
    let start = Instant::now();

    tx.send(MessageToEngine::Notify(NotificationRequest {
        category: Some(Category::Success),
        title: Some("Success".into()),
        description: Some("ok".into()),
        ..Default::default()
    }))
    .await
    .unwrap();
    drop(tx);

    let seen = collect(start, &mut rx).await;
    let frames = frames(&seen);

    let (at, first) = frames[0];
    assert_eq!(at, Duration::ZERO);
    assert_eq!(first.phase, Phase::IconReveal);
    assert_eq!(first.icon, IconSource::Symbol("circle-check".into()));
    assert_eq!(first.icon_color, "#12b886");
    assert_eq!(first.position, Position::TopRight);
    assert!(first.show_countdown);
    assert_eq!(
        first.animation,
        Some(animation::describe(Position::TopRight, Transition::Enter))
    );

    assert_eq!(
        phase_entries(&seen),
        [
            (Duration::ZERO, Phase::IconReveal),
            (ms(500), Phase::BackgroundReveal),
            (ms(800), Phase::ShadowReveal),
            (ms(800), Phase::ContentReveal),
            (ms(800), Phase::CountingDown),
            (ms(3000), Phase::Exiting),
            (ms(3400), Phase::Disposed),
        ]
    );

    let exiting = frames
        .iter()
        .find(|(_, frame)| frame.phase == Phase::Exiting)
        .unwrap();
    let exit = exiting.1.animation.unwrap();
    assert_eq!(exit.axis, Axis::X);
    assert_eq!(exit.distance_to, Distance::Percent(100));

    assert!(matches!(
        seen.last(),
        Some(Seen::Dismissed(at, InstanceKey::Anonymous(_), 0)) if *at == ms(3400)
    ));
}

#[tokio::test(start_paused = true)]
async fn countdown_is_monotonic_and_ends_at_the_duration() {
    let (tx, mut rx) = spawn_engine();
    let start = Instant::now();

    tx.send(MessageToEngine::Notify(NotificationRequest {
        title: Some("Info".into()),
        duration_ms: Some(2000),
        ..Default::default()
    }))
    .await
    .unwrap();
    drop(tx);

    let seen = collect(start, &mut rx).await;
    let frames = frames(&seen);

    assert_eq!(frames[0].1.remaining_percent, 100);
    for pair in frames.windows(2) {
        assert!(pair[1].1.remaining_percent <= pair[0].1.remaining_percent);
    }

    let zero = frames
        .iter()
        .find(|(_, frame)| frame.remaining_percent == 0)
        .unwrap();
    assert_eq!(zero.0, ms(2000));
    assert!(frames.iter().all(|(at, frame)| *at >= ms(1980) || frame.remaining_percent > 0));
}

#[tokio::test(start_paused = true)]
async fn description_only_error_is_shown_alone() {
    let (tx, mut rx) = spawn_engine();
    let start = Instant::now();

    tx.send(MessageToEngine::Notify(NotificationRequest {
        category: Some(Category::Error),
        description: Some("failure text".into()),
        ..Default::default()
    }))
    .await
    .unwrap();
    drop(tx);

    let seen = collect(start, &mut rx).await;
    let frames = frames(&seen);
    let (_, frame) = frames[0];
    assert_eq!(frame.title, None);
    assert_eq!(frame.description.as_deref(), Some("failure text"));
    assert!(frame.description_only);
    assert_eq!(frame.icon, IconSource::Symbol("circle-xmark".into()));
    assert_eq!(frame.icon_color, "#f03e3e");

    let keys: Vec<&InstanceKey> = frames.iter().map(|(_, frame)| &frame.key).collect();
    assert!(keys.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test(start_paused = true)]
async fn empty_request_is_dropped() {
    let (tx, mut rx) = spawn_engine();
    let start = Instant::now();

    tx.send(MessageToEngine::Notify(NotificationRequest::default()))
        .await
        .unwrap();
    drop(tx);

    assert!(collect(start, &mut rx).await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn reused_identity_replaces_the_live_instance() {
    let (tx, mut rx) = spawn_engine();
    let start = Instant::now();

    tokio::spawn(async move {
        tx.send(MessageToEngine::Notify(NotificationRequest {
            identity: Some("x".into()),
            title: Some("first".into()),
            duration_ms: Some(5000),
            ..Default::default()
        }))
        .await
        .unwrap();
        time::sleep(ms(200)).await;
        tx.send(MessageToEngine::Notify(NotificationRequest {
            identity: Some("x".into()),
            title: Some("second".into()),
            duration_ms: Some(1000),
            ..Default::default()
        }))
        .await
        .unwrap();
    });

    let seen = collect(start, &mut rx).await;
    let key = InstanceKey::Named("x".into());

    let replaced_at = seen
        .iter()
        .position(|seen| matches!(seen, Seen::Dismissed(_, k, 0) if *k == key))
        .expect("first instance is dismissed");
    let Seen::Dismissed(dismissed_at, ..) = &seen[replaced_at] else {
        unreachable!()
    };
    assert_eq!(*dismissed_at, ms(200));

    // nothing from the first instance after it was replaced
    assert!(seen[replaced_at..].iter().all(|seen| match seen {
        Seen::Frame(_, frame) => frame.generation == 1,
        Seen::Dismissed(_, _, generation) => *generation <= 1,
    }));
    let first_frames: Vec<_> = frames(&seen)
        .into_iter()
        .filter(|(_, frame)| frame.generation == 0)
        .collect();
    assert!(first_frames.iter().all(|(at, _)| *at <= ms(200)));
    assert!(first_frames.iter().all(|(_, frame)| frame.remaining_percent >= 96));

    let second: Vec<_> = frames(&seen)
        .into_iter()
        .filter(|(_, frame)| frame.generation == 1)
        .collect();
    assert_eq!(second[0].0, ms(200));
    assert_eq!(second[0].1.remaining_percent, 100);
    assert_eq!(second[0].1.title.as_deref(), Some("second"));

    let exiting = second
        .iter()
        .find(|(_, frame)| frame.phase == Phase::Exiting)
        .unwrap();
    assert_eq!(exiting.0, ms(1200));

    assert!(matches!(
        seen.last(),
        Some(Seen::Dismissed(at, k, 1)) if *at == ms(1600) && *k == key
    ));
}

#[tokio::test(start_paused = true)]
async fn shutdown_dismisses_everything_at_once() {
    let (tx, mut rx) = spawn_engine();
    let start = Instant::now();

    for identity in [Some("a".to_string()), None] {
        tx.send(MessageToEngine::Notify(NotificationRequest {
            identity,
            title: Some("pending".into()),
            ..Default::default()
        }))
        .await
        .unwrap();
    }
    time::sleep(ms(100)).await;
    tx.send(MessageToEngine::Shutdown).await.unwrap();

    let seen = collect(start, &mut rx).await;
    let dismissed: Vec<_> = seen
        .iter()
        .filter(|seen| matches!(seen, Seen::Dismissed(..)))
        .collect();
    assert_eq!(dismissed.len(), 2);

    let first_dismissal = seen
        .iter()
        .position(|seen| matches!(seen, Seen::Dismissed(..)))
        .unwrap();
    assert!(
        seen[first_dismissal..]
            .iter()
            .all(|seen| matches!(seen, Seen::Dismissed(at, ..) if *at == ms(100)))
    );
}

#[tokio::test(start_paused = true)]
async fn answers_configuration_requests() {
    let (tx, mut rx) = spawn_engine();

    tx.send(MessageToEngine::ConfigurationRequest).await.unwrap();
    match rx.recv().await {
        Some(MessageFromEngine::ConfigurationResponse(config)) => {
            assert_eq!(config, Config::default())
        }
        other => panic!("unexpected message: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn hidden_countdown_is_reported_to_the_surface() {
    let (tx, mut rx) = spawn_engine();
    let start = Instant::now();

    tx.send(MessageToEngine::Notify(NotificationRequest {
        title: Some("Custom icon success".into()),
        category: Some(Category::Success),
        icon: Some("microchip".into()),
        show_countdown: Some(false),
        position: Some(Position::Bottom),
        ..Default::default()
    }))
    .await
    .unwrap();
    drop(tx);

    let seen = collect(start, &mut rx).await;
    let frames = frames(&seen);
    assert!(frames.iter().all(|(_, frame)| !frame.show_countdown));
    assert!(
        frames
            .iter()
            .all(|(_, frame)| frame.position == Position::BottomCenter)
    );
    assert_eq!(
        frames[0].1.animation.unwrap().distance_from,
        Distance::Px(30)
    );
}

#[test]
fn lagging_surface_still_receives_the_final_frames() {
    let BridgeChannels {
        surface_rx: mut rx,
        surface_tx: tx,
        engine_rx,
        engine_tx,
    } = BridgeChannels::new(1);
    let engine = std::thread::spawn(move || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(toastwin_engine::serve(Config::default(), engine_rx, engine_tx));
    });

    tx.blocking_send(MessageToEngine::Notify(NotificationRequest {
        title: Some("slow surface".into()),
        duration_ms: Some(300),
        ..Default::default()
    }))
    .unwrap();
    drop(tx);

    let mut disposed_frames = 0;
    let mut dismissed = 0;
    while let Some(message) = rx.blocking_recv() {
        std::thread::sleep(ms(10));
        match message {
            MessageFromEngine::Render(frame) if frame.phase == Phase::Disposed => disposed_frames += 1,
            MessageFromEngine::Dismissed { .. } => dismissed += 1,
            _ => {}
        }
    }
    engine.join().unwrap();

    assert_eq!(disposed_frames, 1);
    assert_eq!(dismissed, 1);
}
