mod common;

mod tests {
    use embassy_time::Duration;
    use rgb_mode_engine::channel::{TryReceiveError, TrySendError};
    use rgb_mode_engine::{
        CommandChannel, EngineCommand, EngineRunner, ModeHandle, ModeId, Rgb,
    };

    use crate::common::{ManualClock, ScriptedRng, config, engine, lit_indices};

    #[test]
    fn test_channel_is_bounded_fifo() {
        let channel = CommandChannel::<2>::new();
        let sender = channel.sender();
        let receiver = channel.receiver();
        assert!(sender.try_send(EngineCommand::SetSpeed(1)).is_ok());
        assert!(sender.try_send(EngineCommand::SetSpeed(2)).is_ok());
        assert!(matches!(
            sender.try_send(EngineCommand::Stop),
            Err(TrySendError(EngineCommand::Stop))
        ));
        assert_eq!(channel.len(), 2);

        assert!(matches!(receiver.try_receive(), Ok(EngineCommand::SetSpeed(1))));
        assert!(matches!(receiver.try_receive(), Ok(EngineCommand::SetSpeed(2))));
        assert!(matches!(receiver.try_receive(), Err(TryReceiveError)));
        assert!(receiver.is_empty());
    }

    #[test]
    fn test_commands_are_applied_between_ticks() {
        let clock = ManualClock::default();
        let channel = CommandChannel::<8>::new();
        let sender = channel.sender();
        let engine = engine::<8>(&clock, &config(8), ScriptedRng::constant(0));
        let mut runner = EngineRunner::new(engine, channel.receiver());

        sender.try_send(EngineCommand::set_mode("chase")).unwrap();
        sender.try_send(EngineCommand::SetSpeed(-8)).unwrap();
        sender.try_send(EngineCommand::SetFillRate(0.0)).unwrap();
        sender.try_send(EngineCommand::SetWriteRate(20.0)).unwrap();
        sender.try_send(EngineCommand::SetBrightness(80)).unwrap();
        assert_eq!(runner.process_commands(), 5);

        let engine = runner.engine();
        assert_eq!(engine.active_mode().builtin(), Some(ModeId::Chase));
        assert_eq!(engine.speed(), 248);
        assert_eq!(engine.fill_interval(), Duration::from_millis(1));
        assert_eq!(engine.write_interval(), Duration::from_millis(50));
        assert_eq!(engine.driver().brightness, Some(80));

        clock.advance(1);
        assert!(runner.step().filled);
        assert_eq!(lit_indices(runner.engine().frame()), vec![0]);
    }

    #[test]
    fn test_solid_color_and_state_reset_commands() {
        let clock = ManualClock::default();
        let channel = CommandChannel::<4>::new();
        let sender = channel.sender();
        let engine = engine::<4>(&clock, &config(4), ScriptedRng::constant(0));
        let mut runner = EngineRunner::new(engine, channel.receiver());

        let color = Rgb { r: 9, g: 8, b: 7 };
        sender.try_send(EngineCommand::SetModeId(ModeId::Solid)).unwrap();
        sender.try_send(EngineCommand::SetSolidColor(Some(color))).unwrap();
        runner.process_commands();
        runner.engine_mut().fill();
        assert!(runner.engine().frame().iter().all(|led| *led == color));

        sender.try_send(EngineCommand::SetModeId(ModeId::Chase)).unwrap();
        runner.process_commands();
        runner.engine_mut().fill();
        runner.engine_mut().fill();
        sender.try_send(EngineCommand::ResetModeState).unwrap();
        runner.process_commands();
        runner.engine_mut().fill();
        assert_eq!(lit_indices(runner.engine().frame()), vec![0]);
    }

    #[test]
    fn test_long_mode_name_falls_back_to_rainbow() {
        let clock = ManualClock::default();
        let channel = CommandChannel::<2>::new();
        let engine = engine::<4>(&clock, &config(4), ScriptedRng::constant(0));
        let mut runner = EngineRunner::new(engine, channel.receiver());
        runner
            .engine_mut()
            .register("a-mode-name-that-is-far-", ModeHandle::Builtin(ModeId::Fire))
            .unwrap();
        runner.engine_mut().set_mode("a-mode-name-that-is-far-");
        assert_eq!(runner.engine().active_mode().builtin(), Some(ModeId::Fire));

        channel
            .sender()
            .try_send(EngineCommand::set_mode("a-mode-name-that-is-far-too-long"))
            .unwrap();
        runner.process_commands();
        assert_eq!(
            runner.engine().active_mode().builtin(),
            Some(ModeId::Rainbow)
        );
    }

    #[test]
    fn test_run_blocking_until_stop_command() {
        let clock = ManualClock::default();
        let channel = CommandChannel::<2>::new();
        let sender = channel.sender();
        let mut cfg = config(8);
        cfg.fill_rate_hz = 1000.0;
        cfg.write_rate_hz = 10.0;
        let mut engine = engine::<8>(&clock, &cfg, ScriptedRng::constant(0));
        engine.stop();
        let mut runner = EngineRunner::new(engine, channel.receiver());

        let mut sleeps = 0_u32;
        runner.run_blocking(|quantum| {
            assert_eq!(quantum, Duration::from_millis(1));
            clock.advance(1);
            sleeps += 1;
            if sleeps == 1001 {
                sender.try_send(EngineCommand::Stop).unwrap();
            }
        });

        let engine = runner.into_engine();
        assert!(!engine.is_running());
        assert_eq!(sleeps, 1001);
        assert_eq!(engine.stats().fills, 1000);
        assert_eq!(engine.stats().writes, 10);
    }

    #[test]
    fn test_run_blocking_stops_without_driver_success() {
        let clock = ManualClock::default();
        let channel = CommandChannel::<2>::new();
        let sender = channel.sender();
        let mut engine = engine::<2>(&clock, &config(2), ScriptedRng::constant(0));
        engine.driver_mut().fail = true;
        let mut runner = EngineRunner::new(engine, channel.receiver());

        let mut sleeps = 0_u32;
        runner.run_blocking(|_| {
            clock.advance(10);
            sleeps += 1;
            if sleeps == 5 {
                sender.try_send(EngineCommand::Stop).unwrap();
            }
        });
        assert!(runner.engine().stats().failed_writes > 0);
        assert!(!runner.engine().is_running());
    }
}
