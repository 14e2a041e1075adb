//! Device event dispatcher: the controller's single control loop

use std::ops::ControlFlow;

use tokio::runtime::Handle;
use tokio::task::JoinError;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::domain::config::{RemovalPolicy, TargetDeviceSpec};
use crate::domain::device::{DeviceDescriptor, DeviceId, DeviceMatcher};
use crate::domain::recording::Duration;
use crate::domain::tone::ToneSource;

use super::binder::StreamBinder;
use super::events::{ControllerEvent, EventReceiver, EventSender};
use super::ports::{AudioOutput, PlaybackStatus, TimerService};
use super::trigger::PeriodicTrigger;

/// Static controller configuration, fixed at construction
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub target: TargetDeviceSpec,
    /// Time between tone cycles
    pub interval: Duration,
    /// Upper bound on each wait for a notification
    pub poll_interval: Duration,
    pub removal_policy: RemovalPolicy,
}

/// Result of one attempt to queue a tone cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A cycle of `samples` interleaved samples was queued
    Enqueued { samples: usize },
    /// Enough audio was already buffered
    Skipped { queued_bytes: usize },
    /// The stream rejected the samples
    Failed,
}

/// Consumes controller events in arrival order and sequences the matcher,
/// binder, trigger and tone source.
///
/// All controller state lives here and is only touched from `handle`.
pub struct DeviceEventDispatcher<O: AudioOutput, T: TimerService> {
    config: ControllerConfig,
    matcher: DeviceMatcher,
    binder: StreamBinder<O>,
    trigger: PeriodicTrigger<T>,
    source: ToneSource,
    samples: Vec<f32>,
}

impl<O: AudioOutput, T: TimerService> DeviceEventDispatcher<O, T> {
    /// Create a dispatcher. `events` is handed to armed timers so their
    /// firings come back through the same queue.
    pub fn new(
        config: ControllerConfig,
        output: O,
        timer: T,
        source: ToneSource,
        events: EventSender,
    ) -> Self {
        let samples = Vec::with_capacity(source.buffer_len());
        Self {
            matcher: DeviceMatcher::new(config.target.name()),
            config,
            binder: StreamBinder::new(output),
            trigger: PeriodicTrigger::new(timer, events),
            source,
            samples,
        }
    }

    pub fn binder(&self) -> &StreamBinder<O> {
        &self.binder
    }

    pub fn trigger(&self) -> &PeriodicTrigger<T> {
        &self.trigger
    }

    /// Process events until `Quit` arrives or the queue closes, then
    /// release the timer and stream.
    ///
    /// Each wait is bounded by the poll interval.
    pub async fn run(&mut self, events: &mut EventReceiver) {
        info!(target_device = %self.matcher.target(), "waiting for audio device events");

        loop {
            let event = match timeout(self.config.poll_interval.as_std(), events.recv()).await {
                Ok(Some(event)) => event,
                Ok(None) => {
                    warn!("event queue closed");
                    break;
                }
                Err(_) => continue,
            };

            if self.handle(event).is_break() {
                break;
            }
        }

        self.shutdown();
    }

    /// Run the control loop on tokio's blocking pool.
    ///
    /// Binding a device stream blocks until the stream starts, so the loop
    /// must not occupy an async worker.
    pub async fn run_blocking(mut self, mut events: EventReceiver) -> Result<(), JoinError>
    where
        O: 'static,
        T: 'static,
    {
        let runtime = Handle::current();
        tokio::task::spawn_blocking(move || runtime.block_on(self.run(&mut events))).await
    }

    /// Handle a single event
    pub fn handle(&mut self, event: ControllerEvent) -> ControlFlow<()> {
        match event {
            ControllerEvent::DeviceAdded(device) => self.on_device_added(device),
            ControllerEvent::DeviceRemoved(device_id) => self.on_device_removed(device_id),
            ControllerEvent::TriggerFired => {
                debug!("sound timer triggered");
                self.play_cycle();
            }
            ControllerEvent::Quit => {
                info!("quit requested");
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn on_device_added(&mut self, device: DeviceDescriptor) {
        info!(
            device_id = %device.id,
            kind = device.kind(),
            name = %device.name,
            "audio device added"
        );

        if device.is_input || !self.matcher.is_match(&device.name) {
            return;
        }

        let handle = match self.binder.open(&device) {
            Ok(handle) => handle,
            Err(e) => {
                warn!(device_id = %device.id, error = %e, "open failed, waiting for next device");
                return;
            }
        };

        if let Err(e) = self.binder.bind(handle) {
            warn!(device_id = %device.id, error = %e, "bind failed, waiting for next device");
            return;
        }
        info!(device_id = %device.id, "successfully opened and bound device");

        if let Err(e) = self.trigger.arm(self.config.interval) {
            error!(error = %e, "periodic playback disabled until the next rebind");
        }

        // Initial sound confirms the (re)connection without waiting a full interval
        self.play_cycle();
    }

    fn on_device_removed(&mut self, device_id: DeviceId) {
        let was_bound = self
            .binder
            .bound_device()
            .is_some_and(|handle| handle.device_id == device_id);
        info!(device_id = %device_id, bound = was_bound, "audio device removed");

        if !was_bound || self.config.removal_policy == RemovalPolicy::Ignore {
            return;
        }

        if self.binder.output().playback_status(device_id) == PlaybackStatus::Stopped {
            info!(device_id = %device_id, "bound device stopped, disarming trigger");
            self.trigger.disarm();
        }
    }

    /// Synthesize and queue one cycle unless half a second or more of
    /// audio is already buffered.
    pub fn play_cycle(&mut self) -> CycleOutcome {
        let queued_bytes = self.binder.available_buffered_bytes();
        let limit = self.config.target.stream().half_second_bytes();
        if queued_bytes >= limit {
            debug!(queued_bytes, limit, "enough audio buffered, skipping cycle");
            return CycleOutcome::Skipped { queued_bytes };
        }

        let cycle = self.source.next_cycle(&mut self.samples);
        match self.binder.enqueue(cycle) {
            Ok(()) => {
                debug!(samples = cycle.len(), "tone cycle queued");
                CycleOutcome::Enqueued {
                    samples: cycle.len(),
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to queue tone cycle");
                CycleOutcome::Failed
            }
        }
    }

    /// Disarm the trigger and release the stream and sample buffer
    pub fn shutdown(&mut self) {
        self.trigger.disarm();
        self.binder.unbind();
        self.samples = Vec::new();
        info!("controller stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::event_queue;
    use crate::application::test_support::{capture, descriptor, MockOutput, MockTimer};
    use crate::application::trigger::TriggerState;
    use crate::domain::config::StreamSpec;
    use crate::domain::tone::{ToneEnvelopeSpec, ToneSynthesizer};

    const HALF_SECOND_BYTES: usize = 8000 * 4 / 2;

    fn config(policy: RemovalPolicy) -> ControllerConfig {
        ControllerConfig {
            target: TargetDeviceSpec::new("Foo", StreamSpec::default()),
            interval: Duration::from_secs(4),
            poll_interval: Duration::from_millis(20),
            removal_policy: policy,
        }
    }

    fn tone() -> ToneSource {
        let envelope = ToneEnvelopeSpec::new(
            Duration::from_secs(2),
            Duration::from_millis(150),
            440,
            8000,
        )
        .unwrap();
        ToneSource::Synthesized(ToneSynthesizer::new(envelope, 1))
    }

    fn dispatcher(
        policy: RemovalPolicy,
    ) -> (DeviceEventDispatcher<MockOutput, MockTimer>, MockOutput, MockTimer) {
        let output = MockOutput::new();
        let timer = MockTimer::new();
        let (tx, _rx) = event_queue();
        let dispatcher =
            DeviceEventDispatcher::new(config(policy), output.clone(), timer.clone(), tone(), tx);
        (dispatcher, output, timer)
    }

    #[test]
    fn matching_device_binds_arms_and_plays_initial_sound() {
        let (mut d, output, timer) = dispatcher(RemovalPolicy::default());

        d.handle(ControllerEvent::DeviceAdded(descriptor(1, "Foo Analog Stereo")));

        let log = output.log();
        assert!(log.is_bound(1));
        assert_eq!(log.enqueued, vec![16000]);
        assert_eq!(timer.log().active.len(), 1);
        assert_eq!(timer.log().intervals, vec![Duration::from_secs(4)]);
    }

    #[test]
    fn capture_devices_are_ignored() {
        let (mut d, output, timer) = dispatcher(RemovalPolicy::default());

        d.handle(ControllerEvent::DeviceAdded(capture(1, "Foo Mic")));

        assert!(output.log().opened.is_empty());
        assert!(timer.log().active.is_empty());
    }

    #[test]
    fn non_matching_devices_are_ignored() {
        let (mut d, output, _timer) = dispatcher(RemovalPolicy::default());

        d.handle(ControllerEvent::DeviceAdded(descriptor(1, "Bar")));
        d.handle(ControllerEvent::DeviceAdded(descriptor(2, "My Foo")));

        assert!(output.log().opened.is_empty());
        assert!(d.binder().bound_device().is_none());
    }

    #[test]
    fn last_matching_device_wins() {
        let (mut d, output, timer) = dispatcher(RemovalPolicy::default());

        for (id, name) in [(1, "Foo (2)"), (2, "Foo"), (3, "Bar")] {
            d.handle(ControllerEvent::DeviceAdded(descriptor(id, name)));
        }

        assert_eq!(d.binder().bound_device().map(|h| h.name.as_str()), Some("Foo"));
        assert_eq!(output.log().active_bindings(), 1);
        assert_eq!(timer.log().active.len(), 1);
        assert_eq!(timer.log().cancelled.len(), 1);
    }

    #[test]
    fn trigger_with_drained_buffer_enqueues_a_cycle() {
        let (mut d, output, _timer) = dispatcher(RemovalPolicy::default());

        let outcome = d.play_cycle();
        assert_eq!(outcome, CycleOutcome::Enqueued { samples: 16000 });

        output.set_queued_bytes(0);
        d.handle(ControllerEvent::TriggerFired);
        assert_eq!(output.log().enqueued, vec![16000, 16000]);
    }

    #[test]
    fn trigger_with_full_buffer_skips_synthesis() {
        let (mut d, output, _timer) = dispatcher(RemovalPolicy::default());
        output.set_queued_bytes(HALF_SECOND_BYTES);

        d.handle(ControllerEvent::TriggerFired);

        assert!(output.log().enqueued.is_empty());
        assert_eq!(
            d.play_cycle(),
            CycleOutcome::Skipped {
                queued_bytes: HALF_SECOND_BYTES
            }
        );
    }

    #[test]
    fn open_failure_keeps_previous_state() {
        let (mut d, output, timer) = dispatcher(RemovalPolicy::default());
        d.handle(ControllerEvent::DeviceAdded(descriptor(1, "Foo")));

        output.set_fail_open(true);
        d.handle(ControllerEvent::DeviceAdded(descriptor(2, "Foo (2)")));

        assert!(output.log().is_bound(1));
        assert_eq!(timer.log().active.len(), 1);
    }

    #[test]
    fn bind_failure_leaves_controller_unbound_and_running() {
        let (mut d, output, _timer) = dispatcher(RemovalPolicy::default());
        output.set_fail_bind(true);

        let flow = d.handle(ControllerEvent::DeviceAdded(descriptor(1, "Foo")));

        assert!(flow.is_continue());
        assert!(d.binder().bound_device().is_none());
        assert!(output.log().enqueued.is_empty());
    }

    #[test]
    fn timer_failure_still_plays_initial_sound() {
        let (mut d, output, timer) = dispatcher(RemovalPolicy::default());
        timer.set_fail_schedule(true);

        d.handle(ControllerEvent::DeviceAdded(descriptor(1, "Foo")));

        assert!(!d.trigger().is_armed());
        assert!(output.log().is_bound(1));
        assert_eq!(output.log().enqueued.len(), 1);
    }

    #[test]
    fn enqueue_failure_is_reported_not_fatal() {
        let (mut d, output, _timer) = dispatcher(RemovalPolicy::default());
        output.set_fail_enqueue(true);

        assert_eq!(d.play_cycle(), CycleOutcome::Failed);
        assert!(d.handle(ControllerEvent::TriggerFired).is_continue());
    }

    #[test]
    fn removal_of_stopped_bound_device_disarms() {
        let (mut d, output, timer) = dispatcher(RemovalPolicy::DisarmIfStopped);
        d.handle(ControllerEvent::DeviceAdded(descriptor(1, "Foo")));
        output.mark_stopped(1);

        d.handle(ControllerEvent::DeviceRemoved(DeviceId(1)));

        assert_eq!(d.trigger().state(), TriggerState::Idle);
        assert!(timer.log().active.is_empty());
    }

    #[test]
    fn removal_of_playing_device_keeps_trigger_armed() {
        let (mut d, _output, timer) = dispatcher(RemovalPolicy::DisarmIfStopped);
        d.handle(ControllerEvent::DeviceAdded(descriptor(1, "Foo")));

        d.handle(ControllerEvent::DeviceRemoved(DeviceId(1)));

        assert!(d.trigger().is_armed());
        assert_eq!(timer.log().active.len(), 1);
    }

    #[test]
    fn removal_of_unrelated_device_is_only_logged() {
        let (mut d, output, _timer) = dispatcher(RemovalPolicy::DisarmIfStopped);
        d.handle(ControllerEvent::DeviceAdded(descriptor(1, "Foo")));
        output.mark_stopped(7);

        d.handle(ControllerEvent::DeviceRemoved(DeviceId(7)));

        assert!(d.trigger().is_armed());
    }

    #[test]
    fn ignore_policy_never_disarms() {
        let (mut d, output, _timer) = dispatcher(RemovalPolicy::Ignore);
        d.handle(ControllerEvent::DeviceAdded(descriptor(1, "Foo")));
        output.mark_stopped(1);

        d.handle(ControllerEvent::DeviceRemoved(DeviceId(1)));

        assert!(d.trigger().is_armed());
    }

    #[test]
    fn reconnect_after_removal_rearms() {
        let (mut d, output, timer) = dispatcher(RemovalPolicy::DisarmIfStopped);
        d.handle(ControllerEvent::DeviceAdded(descriptor(1, "Foo")));
        output.mark_stopped(1);
        d.handle(ControllerEvent::DeviceRemoved(DeviceId(1)));
        assert!(!d.trigger().is_armed());

        d.handle(ControllerEvent::DeviceAdded(descriptor(2, "Foo (2)")));

        assert!(d.trigger().is_armed());
        let log = output.log();
        assert!(log.is_bound(2));
        assert_eq!(log.active_bindings(), 1);
        assert_eq!(timer.log().active.len(), 1);
    }

    #[test]
    fn quit_breaks_the_loop() {
        let (mut d, _output, _timer) = dispatcher(RemovalPolicy::default());
        assert!(d.handle(ControllerEvent::Quit).is_break());
    }

    #[tokio::test]
    async fn run_processes_in_order_and_releases_on_quit() {
        let output = MockOutput::new();
        let timer = MockTimer::new();
        let (tx, mut rx) = event_queue();
        let mut d = DeviceEventDispatcher::new(
            config(RemovalPolicy::default()),
            output.clone(),
            timer.clone(),
            tone(),
            tx.clone(),
        );

        tx.send(ControllerEvent::DeviceAdded(descriptor(1, "Foo"))).unwrap();
        tx.send(ControllerEvent::TriggerFired).unwrap();
        tx.send(ControllerEvent::Quit).unwrap();
        tx.send(ControllerEvent::DeviceAdded(descriptor(2, "Foo (2)"))).unwrap();

        d.run(&mut rx).await;

        let log = output.log();
        // Initial sound queued; the trigger was skipped by back-pressure
        assert_eq!(log.enqueued, vec![16000]);
        assert!(!log.opened.contains(&DeviceId(2)));
        assert_eq!(log.active_bindings(), 0);
        assert!(timer.log().active.is_empty());
    }

    #[tokio::test]
    async fn run_keeps_polling_while_idle() {
        let output = MockOutput::new();
        let (tx, mut rx) = event_queue();
        let mut d = DeviceEventDispatcher::new(
            config(RemovalPolicy::default()),
            output.clone(),
            MockTimer::new(),
            tone(),
            tx.clone(),
        );

        let sender = tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            let _ = sender.send(ControllerEvent::Quit);
        });

        tokio::time::timeout(std::time::Duration::from_secs(5), d.run(&mut rx))
            .await
            .expect("dispatcher did not stop");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn run_blocking_processes_events_until_quit() {
        let output = MockOutput::new();
        let timer = MockTimer::new();
        let (tx, rx) = event_queue();
        let d = DeviceEventDispatcher::new(
            config(RemovalPolicy::default()),
            output.clone(),
            timer.clone(),
            tone(),
            tx.clone(),
        );

        tx.send(ControllerEvent::DeviceAdded(descriptor(1, "Foo"))).unwrap();
        let sender = tx.clone();
        let quit = tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            let _ = sender.send(ControllerEvent::Quit);
        });

        tokio::time::timeout(std::time::Duration::from_secs(5), d.run_blocking(rx))
            .await
            .expect("dispatcher did not stop")
            .unwrap();
        quit.await.unwrap();

        let log = output.log();
        assert_eq!(log.enqueued, vec![16000]);
        assert_eq!(log.active_bindings(), 0);
        assert!(timer.log().active.is_empty());
    }
}
