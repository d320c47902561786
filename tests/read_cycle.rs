mod tests {
    use myrtio_tcs230::read_cycle::MAX_ACTIONS;
    use myrtio_tcs230::{Action, ColorChannel, ReadState};

    #[test]
    fn test_start_selects_red_and_opens_gate() {
        let transition = ReadState::start().step(false);
        assert_eq!(transition.next, ReadState::Measuring(ColorChannel::Red));
        assert_eq!(
            transition.actions.as_slice(),
            &[Action::SelectFilter(ColorChannel::Red), Action::StartGate]
        );
    }

    #[test]
    fn test_measuring_waits_for_counter() {
        let state = ReadState::Measuring(ColorChannel::Green);
        let transition = state.step(false);
        assert_eq!(transition.next, state);
        assert!(transition.actions.is_empty());
    }

    #[test]
    fn test_idle_is_inert() {
        for ready in [false, true] {
            let transition = ReadState::Idle.step(ready);
            assert_eq!(transition.next, ReadState::Idle);
            assert!(transition.actions.is_empty());
        }
    }

    #[test]
    fn test_full_cycle_order() {
        let mut state = ReadState::start();
        let mut actions = Vec::new();
        let mut steps = 0;
        while state != ReadState::Idle {
            let ready = matches!(state, ReadState::Measuring(_));
            let transition = state.step(ready);
            actions.extend(transition.actions);
            state = transition.next;
            steps += 1;
            assert!(steps < 20);
        }

        assert_eq!(
            actions,
            [
                Action::SelectFilter(ColorChannel::Red),
                Action::StartGate,
                Action::Record(ColorChannel::Red),
                Action::SelectFilter(ColorChannel::Green),
                Action::StartGate,
                Action::Record(ColorChannel::Green),
                Action::SelectFilter(ColorChannel::Blue),
                Action::StartGate,
                Action::Record(ColorChannel::Blue),
                Action::Publish,
            ]
        );
    }

    #[test]
    fn test_blue_finishes_cycle() {
        let transition = ReadState::Measuring(ColorChannel::Blue).step(true);
        assert_eq!(transition.next, ReadState::Done);
        assert_eq!(
            transition.actions.as_slice(),
            &[Action::Record(ColorChannel::Blue)]
        );
        assert!(!ReadState::Done.is_busy());
        assert!(ReadState::Measuring(ColorChannel::Red).is_busy());
        assert!(ReadState::SelectFilter(ColorChannel::Red).is_busy());
    }

    #[test]
    fn test_no_step_exceeds_action_capacity() {
        let mut states = vec![ReadState::Idle, ReadState::Done];
        for channel in ColorChannel::ALL {
            states.push(ReadState::SelectFilter(channel));
            states.push(ReadState::Measuring(channel));
        }
        for state in states {
            for ready in [false, true] {
                assert!(state.step(ready).actions.len() <= MAX_ACTIONS);
            }
        }
    }
}
