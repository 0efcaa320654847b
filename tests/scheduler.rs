mod tests {
    use embassy_time::Duration;
    use rgb_mode_engine::scheduler::{
        DualRateScheduler, GateState, MAX_INTERVAL, TickGate, interval_from_hz,
    };
    use rgb_mode_engine::ticks_diff;

    #[test]
    fn test_interval_from_hz() {
        assert_eq!(interval_from_hz(30.0), Duration::from_millis(33));
        assert_eq!(interval_from_hz(10.0), Duration::from_millis(100));
        assert_eq!(interval_from_hz(500.0), Duration::from_millis(2));
        assert_eq!(interval_from_hz(3.0), Duration::from_millis(333));
        assert_eq!(interval_from_hz(0.5), Duration::from_millis(2000));
        assert_eq!(interval_from_hz(1000.0), Duration::from_millis(1));
    }

    #[test]
    fn test_interval_floor() {
        assert_eq!(interval_from_hz(0.0), Duration::from_millis(1));
        assert_eq!(interval_from_hz(-20.0), Duration::from_millis(1));
        assert_eq!(interval_from_hz(f32::NAN), Duration::from_millis(1));
        assert_eq!(interval_from_hz(100_000.0), Duration::from_millis(1));
    }

    #[test]
    fn test_interval_ceiling_for_tiny_rates() {
        assert_eq!(interval_from_hz(1e-20), MAX_INTERVAL);
        assert_eq!(interval_from_hz(f32::MIN_POSITIVE), MAX_INTERVAL);
        assert_eq!(MAX_INTERVAL, Duration::from_millis(u64::from(u32::MAX)));
        assert_eq!(interval_from_hz(0.001), Duration::from_millis(1_000_000));
    }

    #[test]
    fn test_ticks_diff_wraps() {
        assert_eq!(ticks_diff(5, 3), 2);
        assert_eq!(ticks_diff(4, u32::MAX - 5), 10);
    }

    #[test]
    fn test_gate_across_rollover() {
        let gate = TickGate::new(Duration::from_millis(10), u32::MAX - 5);
        assert_eq!(gate.state(3), GateState::Waiting);
        assert_eq!(gate.remaining(3), 1);
        assert_eq!(gate.state(4), GateState::Due);
        assert_eq!(gate.remaining(4), 0);
    }

    #[test]
    fn test_gate_zero_interval_is_clamped() {
        let mut gate = TickGate::new(Duration::from_millis(0), 100);
        assert_eq!(gate.interval(), Duration::from_millis(1));
        assert!(!gate.is_due(100));
        assert!(gate.is_due(101));

        gate.set_interval(Duration::from_millis(0));
        assert_eq!(gate.interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_gates_are_independent() {
        let mut scheduler =
            DualRateScheduler::new(Duration::from_millis(2), Duration::from_millis(4), 0);
        assert!(scheduler.fill_due(2));
        assert!(!scheduler.write_due(2));
        scheduler.complete_fill(2);
        assert!(!scheduler.fill_due(3));
        assert!(scheduler.write_due(4));
        assert_eq!(scheduler.next_due_in(3), 1);

        scheduler.begin_write();
        assert!(scheduler.is_write_pending());
        scheduler.complete_write(4);
        assert!(!scheduler.is_write_pending());
        assert!(!scheduler.write_due(7));
        assert!(scheduler.write_due(8));
    }

    #[test]
    fn test_reconfiguration_applies_on_next_check() {
        let mut scheduler =
            DualRateScheduler::new(Duration::from_millis(100), Duration::from_millis(100), 0);
        assert!(!scheduler.fill_due(10));
        scheduler.set_fill_interval(Duration::from_millis(5));
        assert!(scheduler.fill_due(10));
        assert_eq!(scheduler.fill_gate().last_fire(), 0);
    }
}
