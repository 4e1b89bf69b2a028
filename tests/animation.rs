use eustat_viz::{AnimationDriver, AnimationState, FrameSink};
use std::time::{Duration, Instant};

#[derive(Default)]
struct Log(Vec<String>);

impl FrameSink for Log {
    fn select_year(&mut self, year: i32) {
        self.0.push(format!("select {year}"));
    }
    fn render_year(&mut self, year: i32) {
        self.0.push(format!("render {year}"));
    }
}

const SECOND: Duration = Duration::from_secs(1);

#[test]
fn plays_every_year_in_order_then_goes_idle() {
    let t0 = Instant::now();
    let mut driver = AnimationDriver::new(SECOND);
    let mut log = Log::default();
    driver.start([2012, 2010, 2011], t0);
    assert!(driver.is_running());

    assert_eq!(driver.poll_with(t0, &mut log), Some(2010));
    assert_eq!(driver.poll_with(t0 + SECOND, &mut log), Some(2011));
    assert_eq!(driver.poll_with(t0 + 2 * SECOND, &mut log), Some(2012));
    assert_eq!(driver.state(), AnimationState::Idle);
    assert_eq!(driver.poll_with(t0 + 10 * SECOND, &mut log), None);

    assert_eq!(
        log.0,
        [
            "select 2010", "render 2010", "select 2011", "render 2011", "select 2012",
            "render 2012"
        ]
    );
}

#[test]
fn frames_wait_for_the_delay() {
    let t0 = Instant::now();
    let mut driver = AnimationDriver::new(SECOND);
    driver.start([2020, 2021], t0);
    assert_eq!(driver.poll(t0), Some(2020));
    assert_eq!(driver.poll(t0 + Duration::from_millis(999)), None);
    assert_eq!(driver.time_until_next(t0), Some(SECOND));
    assert_eq!(driver.poll(t0 + SECOND), Some(2021));
}

#[test]
fn stop_cancels_pending_frames() {
    let t0 = Instant::now();
    let mut driver = AnimationDriver::new(SECOND);
    let mut log = Log::default();
    driver.start([2010, 2011, 2012], t0);
    driver.poll_with(t0, &mut log);
    driver.stop();

    assert_eq!(driver.state(), AnimationState::Stopped);
    assert_eq!(driver.time_until_next(t0), None);
    assert_eq!(driver.poll_with(t0 + 5 * SECOND, &mut log), None);
    assert_eq!(log.0, ["select 2010", "render 2010"]);
}

#[test]
fn empty_year_list_stays_idle() {
    let mut driver = AnimationDriver::default();
    driver.start(Vec::new(), Instant::now());
    assert_eq!(driver.state(), AnimationState::Idle);
    assert_eq!(driver.poll(Instant::now()), None);
}

#[test]
fn restart_begins_from_the_first_year() {
    let t0 = Instant::now();
    let mut driver = AnimationDriver::new(SECOND);
    driver.start([2010, 2011], t0);
    driver.poll(t0);
    driver.start([2011, 2010, 2010], t0 + SECOND);
    assert_eq!(driver.years(), [2010, 2011]);
    assert_eq!(driver.poll(t0 + SECOND), Some(2010));
}

#[test]
fn run_blocking_with_zero_delay_plays_everything() {
    let mut driver = AnimationDriver::new(Duration::ZERO);
    let mut log = Log::default();
    driver.start([2001, 2000], Instant::now());
    driver.run_blocking(&mut log);
    assert_eq!(log.0.len(), 4);
    assert_eq!(driver.state(), AnimationState::Idle);
}

/// Fails to render one year and asks playback to end.
struct FailsAt {
    year: i32,
    rendered: Vec<i32>,
    failed: bool,
}

impl FrameSink for FailsAt {
    fn select_year(&mut self, _year: i32) {}
    fn render_year(&mut self, year: i32) {
        self.rendered.push(year);
        self.failed |= year == self.year;
    }
    fn keep_running(&self) -> bool {
        !self.failed
    }
}

#[test]
fn sink_failure_ends_blocking_playback_without_waiting() {
    // an hour between frames: any wait after the failure would hang the test
    let mut driver = AnimationDriver::new(Duration::from_secs(3600));
    let mut sink = FailsAt {
        year: 2010,
        rendered: Vec::new(),
        failed: false,
    };
    driver.start([2010, 2011, 2012], Instant::now());
    let started = Instant::now();
    driver.run_blocking(&mut sink);

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(sink.rendered, [2010]);
    assert_eq!(driver.state(), AnimationState::Stopped);
}
