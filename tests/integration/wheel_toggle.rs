//! Wheel state resolution and toggle tests.

use fw::device::DeviceCatalog;
use fw::error::FwError;
use fw::store::{FLIP_FLOP_WHEEL, MemoryStore, Operation};
use fw::wheel::{WheelController, WheelState};

use crate::common::fixtures::{
    FIRST_MOUSE, GAMING_MOUSE, LOGITECH, MOUSE_DESC, SECOND_MOUSE, device, instance, office_store,
    params_path, root, store_with,
};
use crate::common::init_test_logging;

fn load_mice(store: &MemoryStore) -> Vec<fw::device::DeviceInstance> {
    DeviceCatalog::new(store, root()).load_mice().unwrap()
}

#[test]
fn single_mouse_flips_to_one() {
    init_test_logging();
    let store = store_with(vec![device(
        "X",
        vec![instance("Y", Some("@mouhid.inf,%t%;Mouse Y"), Some(0))],
    )]);
    let mice = load_mice(&store);
    let controller = WheelController::new(&store, root());

    assert_eq!(controller.resolve(&mice[0]).unwrap(), WheelState::Normal);
    assert_eq!(controller.toggle(&mice[0]).unwrap(), WheelState::Flipped);
    assert_eq!(store.integer(&params_path("X", "Y"), FLIP_FLOP_WHEEL), Some(1));
}

#[test]
fn office_states() {
    let store = office_store();
    let mice = load_mice(&store);
    let controller = WheelController::new(&store, root());

    let states: Vec<_> = mice
        .iter()
        .map(|m| controller.resolve(m).unwrap())
        .collect();
    assert_eq!(
        states,
        [WheelState::Normal, WheelState::Flipped, WheelState::Unknown]
    );
    store.assert_no_writes();
}

#[test]
fn double_toggle_restores_value() {
    let store = office_store();
    let mice = load_mice(&store);
    let controller = WheelController::new(&store, root());
    let params = params_path(LOGITECH, SECOND_MOUSE);

    assert_eq!(controller.toggle(&mice[1]).unwrap(), WheelState::Normal);
    assert_eq!(store.integer(&params, FLIP_FLOP_WHEEL), Some(0));
    assert_eq!(controller.toggle(&mice[1]).unwrap(), WheelState::Flipped);
    assert_eq!(store.integer(&params, FLIP_FLOP_WHEEL), Some(1));
    assert_eq!(store.writes().len(), 2);
}

#[test]
fn toggle_touches_only_the_selected_mouse() {
    let store = office_store();
    let mice = load_mice(&store);
    let controller = WheelController::new(&store, root());

    controller.toggle(&mice[0]).unwrap();

    assert_eq!(
        store.writes(),
        [Operation::WriteInteger {
            path: params_path(LOGITECH, FIRST_MOUSE).to_string(),
            name: FLIP_FLOP_WHEEL.to_string(),
            value: 1,
        }]
    );
    assert_eq!(
        store.integer(&params_path(LOGITECH, SECOND_MOUSE), FLIP_FLOP_WHEEL),
        Some(1)
    );
}

#[test]
fn unknown_state_is_not_toggled() {
    let store = office_store();
    let mice = load_mice(&store);
    let controller = WheelController::new(&store, root());

    let err = controller.toggle(&mice[2]).unwrap_err();
    assert!(matches!(err, FwError::UnknownWheelState { .. }));
    assert!(err.to_string().contains(GAMING_MOUSE));
    store.assert_no_writes();
}

#[test]
fn missing_parameters_key_is_unknown() {
    let store = store_with(vec![device(
        LOGITECH,
        vec![fw::store::StoreKey::new(FIRST_MOUSE).with_value("DeviceDesc", MOUSE_DESC)],
    )]);
    let mice = load_mice(&store);
    let controller = WheelController::new(&store, root());

    assert_eq!(controller.resolve(&mice[0]).unwrap(), WheelState::Unknown);
    assert!(controller.toggle(&mice[0]).unwrap_err().is_invalid_state());
}

#[test]
fn out_of_range_value_is_rejected() {
    let store = store_with(vec![device(
        LOGITECH,
        vec![instance(FIRST_MOUSE, Some(MOUSE_DESC), Some(3))],
    )]);
    let mice = load_mice(&store);
    let controller = WheelController::new(&store, root());

    let err = controller.toggle(&mice[0]).unwrap_err();
    assert!(matches!(err, FwError::WheelValueOutOfRange { value: 3, .. }));
    assert!(err.is_invalid_state());
    store.assert_no_writes();
}

#[test]
fn read_only_store_reports_access_error() {
    let store = office_store();
    store.set_read_only(true);
    let mice = load_mice(&store);
    let controller = WheelController::new(&store, root());

    let err = controller.toggle(&mice[0]).unwrap_err();
    assert!(err.is_access_error());
    assert!(err.is_user_recoverable());
    assert_eq!(
        store.integer(&params_path(LOGITECH, FIRST_MOUSE), FLIP_FLOP_WHEEL),
        Some(0)
    );
}

#[test]
fn injected_read_failure_surfaces() {
    let store = office_store();
    let mice = load_mice(&store);
    let controller = WheelController::new(&store, root());

    store.inject_error(FwError::access("Device Parameters", "sharing violation"));
    let err = controller.resolve(&mice[0]).unwrap_err();
    assert!(err.is_access_error());

    assert_eq!(controller.resolve(&mice[0]).unwrap(), WheelState::Normal);
}

#[test]
fn cleared_failure_does_not_fire() {
    let store = office_store();
    let mice = load_mice(&store);
    let controller = WheelController::new(&store, root());

    store.inject_error(FwError::access("Device Parameters", "sharing violation"));
    store.clear_error();
    assert_eq!(controller.toggle(&mice[0]).unwrap(), WheelState::Flipped);
}

#[test]
fn resolve_reads_only_the_parameters_key() {
    let store = office_store();
    let mice = load_mice(&store);
    store.clear_operations();

    let controller = WheelController::new(&store, root());
    controller.resolve(&mice[0]).unwrap();

    let params = params_path(LOGITECH, FIRST_MOUSE).to_string();
    assert_eq!(
        store.operations(),
        [
            Operation::ListValueNames {
                path: params.clone()
            },
            Operation::ReadInteger {
                path: params,
                name: FLIP_FLOP_WHEEL.to_string(),
            },
        ]
    );
}

#[test]
fn plan_matches_toggle() {
    let store = office_store();
    let mice = load_mice(&store);
    let controller = WheelController::new(&store, root());

    let plan = controller.plan_toggle(&mice[0]).unwrap();
    store.assert_no_writes();
    assert_eq!(controller.toggle(&mice[0]).unwrap(), plan.to);
    store.assert_contains(&Operation::ReadInteger {
        path: params_path(LOGITECH, FIRST_MOUSE).to_string(),
        name: FLIP_FLOP_WHEEL.to_string(),
    });
}
