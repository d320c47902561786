mod tests {
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};
    use myrtio_tcs230::{Controller, FilterSelection, FrequencyScale, SelectorPins};

    fn pin(states: &[State]) -> PinMock {
        let transactions: Vec<_> = states.iter().map(|s| PinTransaction::set(s.clone())).collect();
        PinMock::new(&transactions)
    }

    fn finish(pins: SelectorPins<PinMock>) {
        let SelectorPins {
            mut s2,
            mut s3,
            scale,
            oe,
        } = pins;
        s2.done();
        s3.done();
        if let Some((mut s0, mut s1)) = scale {
            s0.done();
            s1.done();
        }
        if let Some(mut oe) = oe {
            oe.done();
        }
    }

    #[test]
    fn test_filter_encoding() {
        use State::{High, Low};
        let s2 = pin(&[Low, High, High, Low]);
        let s3 = pin(&[Low, High, Low, High]);
        let mut controller = Controller::new(s2, s3);

        for filter in [
            FilterSelection::Red,
            FilterSelection::Green,
            FilterSelection::Clear,
            FilterSelection::Blue,
        ] {
            controller.set_filter(filter).unwrap();
            assert_eq!(controller.filter(), filter);
        }
        finish(controller.release());
    }

    #[test]
    fn test_frequency_encoding() {
        use State::{High, Low};
        let s0 = pin(&[High, High, Low, Low]);
        let s1 = pin(&[High, Low, High, Low]);
        let mut controller = Controller::with_scaler(pin(&[]), pin(&[]), s0, s1);

        for frequency in [
            FrequencyScale::High,
            FrequencyScale::Mid,
            FrequencyScale::Low,
            FrequencyScale::Off,
        ] {
            controller.set_frequency(frequency).unwrap();
            assert_eq!(controller.frequency(), frequency);
        }
        finish(controller.release());
    }

    #[test]
    fn test_enable_pin_is_active_low_and_keeps_scale() {
        use State::{High, Low};
        let s0 = pin(&[High]);
        let s1 = pin(&[Low]);
        let oe = pin(&[High, Low]);
        let mut controller = Controller::with_all(pin(&[]), pin(&[]), s0, s1, oe);
        assert!(controller.has_true_enable_pin());

        controller.set_frequency(FrequencyScale::Mid).unwrap();
        controller.set_enable(false).unwrap();
        assert!(!controller.is_enabled());
        assert_eq!(controller.frequency(), FrequencyScale::Mid);

        controller.set_enable(true).unwrap();
        assert!(controller.is_enabled());
        finish(controller.release());
    }

    #[test]
    fn test_enable_falls_back_to_scaler() {
        use State::{High, Low};
        // Mid, then Off on disable, then Mid again on enable
        let s0 = pin(&[High, Low, High]);
        let s1 = pin(&[Low, Low, Low]);
        let mut controller = Controller::with_scaler(pin(&[]), pin(&[]), s0, s1);
        assert!(!controller.has_true_enable_pin());

        controller.set_frequency(FrequencyScale::Mid).unwrap();
        controller.set_enable(false).unwrap();
        assert_eq!(controller.frequency(), FrequencyScale::Off);

        controller.set_enable(true).unwrap();
        assert_eq!(controller.frequency(), FrequencyScale::Mid);
        finish(controller.release());
    }

    #[test]
    fn test_enable_restores_last_active_scale_after_off() {
        use State::{High, Low};
        // Low, Off, then enable restores Low rather than Off
        let s0 = pin(&[Low, Low, Low]);
        let s1 = pin(&[High, Low, High]);
        let mut controller = Controller::with_scaler(pin(&[]), pin(&[]), s0, s1);

        controller.set_frequency(FrequencyScale::Low).unwrap();
        controller.set_frequency(FrequencyScale::Off).unwrap();
        controller.set_enable(true).unwrap();
        assert_eq!(controller.frequency(), FrequencyScale::Low);
        finish(controller.release());
    }

    #[test]
    fn test_unwired_lines_are_recorded_only() {
        let mut controller = Controller::new(pin(&[]), pin(&[]));
        assert!(!controller.has_scaler());

        controller.set_frequency(FrequencyScale::Low).unwrap();
        controller.set_enable(false).unwrap();
        assert!(!controller.is_enabled());
        assert_eq!(controller.frequency(), FrequencyScale::Off);
        finish(controller.release());
    }

    #[test]
    fn test_scale_change_while_disabled_waits_for_enable() {
        use State::{High, Low};
        // Off on disable, nothing on the scale change, Mid on enable
        let s0 = pin(&[Low, High]);
        let s1 = pin(&[Low, Low]);
        let mut controller = Controller::with_scaler(pin(&[]), pin(&[]), s0, s1);

        controller.set_enable(false).unwrap();
        controller.set_frequency(FrequencyScale::Mid).unwrap();
        assert!(!controller.is_enabled());
        assert_eq!(controller.frequency(), FrequencyScale::Off);

        controller.set_enable(true).unwrap();
        assert_eq!(controller.frequency(), FrequencyScale::Mid);
        finish(controller.release());
    }
}
