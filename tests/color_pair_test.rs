//! Color pair binding through the interface.

use tui_console::term::{init_interface, init_pair, BackendCall, CrosstermBackend, RecordingBackend};
use tui_console::types::{BaseColor, ColorPair, InterfaceConfig};

#[test]
fn rebinding_keeps_only_the_last_pair() {
    let backend = RecordingBackend::new();
    let iface = init_interface(backend, &InterfaceConfig::default()).unwrap();

    init_pair(&iface, 3, BaseColor::Red, BaseColor::Black);
    init_pair(&iface, 3, BaseColor::Blue, BaseColor::White);

    assert_eq!(
        iface.pair_content(3),
        Some(ColorPair::new(BaseColor::Blue, BaseColor::White))
    );
}

#[test]
fn binding_is_passed_through_unvalidated() {
    let backend = RecordingBackend::new();
    let log = backend.log();
    let iface = init_interface(backend, &InterfaceConfig::default().with_color_pairs(8)).unwrap();

    init_pair(&iface, 99, BaseColor::Cyan, BaseColor::Magenta);

    assert_eq!(
        log.count(&BackendCall::InitPair(99, BaseColor::Cyan, BaseColor::Magenta)),
        1
    );
    assert_eq!(iface.pair_content(99), None);
}

#[test]
fn crossterm_backend_overwrites_and_bounds_pairs() {
    let backend = CrosstermBackend::headless(Vec::new(), 10, 2);
    let iface = init_interface(backend, &InterfaceConfig::default().with_color_pairs(4)).unwrap();
    assert_eq!(iface.color_pairs(), 4);

    iface.init_pair(3, BaseColor::Red, BaseColor::Black);
    iface.init_pair(3, BaseColor::Blue, BaseColor::White);
    assert_eq!(
        iface.pair_content(3),
        Some(ColorPair::new(BaseColor::Blue, BaseColor::White))
    );

    iface.init_pair(4, BaseColor::Green, BaseColor::Green);
    assert_eq!(iface.pair_content(4), None);
    assert_eq!(iface.pair_content(0), Some(ColorPair::default()));
}

#[test]
fn every_base_color_can_be_bound() {
    let backend = RecordingBackend::new();
    let iface = init_interface(backend, &InterfaceConfig::default()).unwrap();

    for (i, fg) in BaseColor::ALL.into_iter().enumerate() {
        let pair = i as i16 + 1;
        init_pair(&iface, pair, fg, BaseColor::Black);
        assert_eq!(iface.pair_content(pair).map(|p| p.fg), Some(fg));
    }
}
