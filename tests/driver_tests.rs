//! Hand Driver Tests
//!
//! Tests for:
//! - Per-finger fallback: current provider, then default, then skip
//! - Transition speed validation and snapping
//! - Smooth transitions
//! - Provider override lifecycle and stale handles
//! - Hand-level field switching

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};

use vrhand::{
    Axis, Finger, FingerState, Hand, HandDriver, HandError, HandFinger, HandOverrides, HandProfile,
    JointChain, JointSpec, ProviderKey, ProviderSet, Rig, RigSettings, StateProvider, TiltSpec,
    Transition,
};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

const JOINTS: usize = 3;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn build_hand() -> (Rig, Hand) {
    let mut rig = Rig::new();
    let palm = rig.create_node("palm");
    let mut hand = Hand::new().with_anchor(palm);
    for name in HandFinger::iter() {
        let root = rig.create_joint(&format!("{name}_0"), JointSpec::new(Axis::X, FRAC_PI_2, Quat::IDENTITY));
        rig.attach(root, palm);
        let mut parent = root;
        for i in 1..JOINTS {
            let joint = rig.create_joint(&format!("{name}_{i}"), JointSpec::new(Axis::X, FRAC_PI_2, Quat::IDENTITY));
            rig.attach(joint, parent);
            parent = joint;
        }
        let chain = JointChain::detect(&rig, root);
        hand.add_finger(Finger::new(name, root, TiltSpec::default(), chain));
    }
    (rig, hand)
}

fn bends(hand: &Hand, finger: HandFinger) -> Vec<f32> {
    hand.finger(finger).unwrap().chain().bends().collect()
}

fn uniform(name: &str, bend: f32) -> HandProfile {
    HandFinger::iter().fold(HandProfile::new(name), |p, f| {
        p.with_finger(f, FingerState::new(0.0, [bend; JOINTS]))
    })
}

fn setup() -> (ProviderSet, HandDriver, Hand) {
    let mut providers = ProviderSet::new();
    let rest = providers.insert(StateProvider::rest(10));
    let (_, hand) = build_hand();
    (providers, HandDriver::new(rest), hand)
}

// ============================================================================
// Fallback Resolution
// ============================================================================

#[test]
fn default_provider_drives_when_not_overridden() {
    let mut providers = ProviderSet::new();
    let fist = providers.insert(uniform("fist", 1.0));
    let driver = HandDriver::new(fist);
    let (_, mut hand) = build_hand();
    assert!(!driver.is_overridden());

    driver.update_hand(&providers, &mut hand, f32::INFINITY).unwrap();
    assert_eq!(bends(&hand, HandFinger::Ring), vec![1.0; JOINTS]);
}

#[test]
fn current_provider_wins_per_finger() {
    let (mut providers, mut driver, mut hand) = setup();
    let pointing = providers.insert(
        HandProfile::new("pointing")
            .with_finger(HandFinger::Middle, FingerState::new(0.0, [1.0; JOINTS]))
            .with_finger(HandFinger::Index, FingerState::new(0.0, [1.0; JOINTS]).muted()),
    );
    driver.set_provider(Some(pointing));

    driver.update_hand(&providers, &mut hand, f32::INFINITY).unwrap();

    assert_eq!(bends(&hand, HandFinger::Middle), vec![1.0; JOINTS]);
    // muted in the current profile: falls back to the rest default
    assert_eq!(bends(&hand, HandFinger::Index), vec![0.0; JOINTS]);
    assert_eq!(bends(&hand, HandFinger::Thumb), vec![0.0; JOINTS]);
}

#[test]
fn missing_state_only_skips_that_finger() {
    init_logging();
    let mut providers = ProviderSet::new();
    let partial = HandFinger::iter()
        .filter(|&f| f != HandFinger::Ring)
        .fold(HandProfile::new("partial"), |p, f| p.with_finger(f, FingerState::new(0.0, [0.6; JOINTS])));
    let default = providers.insert(partial);
    let driver = HandDriver::new(default);
    let (_, mut hand) = build_hand();
    hand.finger_mut(HandFinger::Ring)
        .unwrap()
        .update_state(&FingerState::new(0.4, [0.2; JOINTS]));

    driver.update_hand(&providers, &mut hand, f32::INFINITY).unwrap();

    assert_eq!(bends(&hand, HandFinger::Ring), vec![0.2; JOINTS]);
    assert!(approx(hand.finger(HandFinger::Ring).unwrap().tilt(), 0.4));
    for finger in [HandFinger::Thumb, HandFinger::Index, HandFinger::Middle, HandFinger::Pinky] {
        assert_eq!(bends(&hand, finger), vec![0.6; JOINTS]);
    }
}

#[test]
fn resolve_finger_state_reports_missing() {
    let mut providers = ProviderSet::new();
    let default = providers.insert(HandProfile::new("empty"));
    let driver = HandDriver::new(default);

    assert_eq!(
        driver.resolve_finger_state(&providers, HandFinger::Thumb),
        Err(HandError::MissingFingerState(HandFinger::Thumb))
    );
}

#[test]
fn resolve_finger_state_prefers_current() {
    let (mut providers, mut driver, _) = setup();
    let fist = providers.insert(uniform("fist", 1.0));
    driver.set_provider(Some(fist));

    let state = driver.resolve_finger_state(&providers, HandFinger::Index).unwrap();
    assert_eq!(state.bends.to_vec(), vec![1.0; JOINTS]);
}

// ============================================================================
// Speed Validation
// ============================================================================

#[test]
fn invalid_speed_is_rejected_before_any_write() {
    let (mut providers, mut driver, mut hand) = setup();
    let fist = providers.insert(uniform("fist", 1.0).with_visibility(false));
    driver.set_provider(Some(fist));

    for speed in [0.0, -1.0, f32::NAN, f32::NEG_INFINITY] {
        let result = driver.update_hand(&providers, &mut hand, speed);
        assert!(matches!(result, Err(HandError::InvalidTransitionSpeed(_))), "speed {speed}");
        assert!(hand.visible);
        assert_eq!(bends(&hand, HandFinger::Index), vec![0.0; JOINTS]);
    }
}

#[test]
fn missing_default_provider_is_an_error() {
    let mut providers = ProviderSet::new();
    let key = providers.insert(StateProvider::rest(3));
    providers.remove(key);
    let driver = HandDriver::new(key);
    let (_, mut hand) = build_hand();

    assert_eq!(
        driver.update_hand(&providers, &mut hand, f32::INFINITY),
        Err(HandError::ProviderNotFound)
    );
}

#[test]
fn infinite_speed_is_idempotent() {
    let (mut providers, mut driver, mut hand) = setup();
    let fist = providers.insert(uniform("fist", 0.7));
    driver.set_provider(Some(fist));

    driver.update_hand(&providers, &mut hand, f32::INFINITY).unwrap();
    let first: Vec<Vec<f32>> = HandFinger::iter().map(|f| bends(&hand, f)).collect();
    driver.update_hand(&providers, &mut hand, f32::INFINITY).unwrap();
    let second: Vec<Vec<f32>> = HandFinger::iter().map(|f| bends(&hand, f)).collect();

    assert_eq!(first, second);
    assert_eq!(first[0], vec![0.7; JOINTS]);
}

#[test]
fn infinite_speed_matches_direct_update_state() {
    let (mut providers, mut driver, mut hand) = setup();
    let pose = providers.insert(
        HandFinger::iter().fold(HandProfile::new("pose"), |p, f| {
            p.with_finger(f, FingerState::new(-0.4, [0.2, 0.5, 0.9, 1.0]))
        }),
    );
    driver.set_provider(Some(pose));
    hand.finger_mut(HandFinger::Middle)
        .unwrap()
        .update_state(&FingerState::new(0.6, [0.8; JOINTS]));

    let mut direct = hand.clone();
    for finger in direct.fingers_mut() {
        let target = driver.resolve_finger_state(&providers, finger.name()).unwrap();
        finger.update_state(&target);
    }

    driver.update_hand(&providers, &mut hand, f32::INFINITY).unwrap();

    for finger in HandFinger::iter() {
        let driven = hand.finger(finger).unwrap();
        let expected = direct.finger(finger).unwrap();
        assert_eq!(driven.current_state(), expected.current_state(), "{finger}");
        assert!(approx(driven.tilt(), -0.4));
    }
}

// ============================================================================
// Smooth Transitions
// ============================================================================

#[test]
fn smooth_transition_moves_part_way() {
    let (mut providers, mut driver, mut hand) = setup();
    let fist = providers.insert(
        HandFinger::iter().fold(HandProfile::new("fist"), |p, f| {
            p.with_finger(f, FingerState::new(1.0, [1.0; JOINTS]))
        }),
    );
    driver.set_provider(Some(fist));

    driver.update_hand(&providers, &mut hand, 0.25).unwrap();
    let index = hand.finger(HandFinger::Index).unwrap();
    assert!(approx(index.tilt(), 0.25));
    assert!(index.chain().bends().all(|b| approx(b, 0.25)));

    driver.update_hand(&providers, &mut hand, 0.25).unwrap();
    let index = hand.finger(HandFinger::Index).unwrap();
    assert!(index.chain().bends().all(|b| approx(b, 0.4375)));
}

#[test]
fn smooth_transition_speed_above_one_reaches_target() {
    let (mut providers, mut driver, mut hand) = setup();
    let fist = providers.insert(uniform("fist", 1.0));
    driver.set_provider(Some(fist));

    driver.update_hand(&providers, &mut hand, 5.0).unwrap();
    assert_eq!(bends(&hand, HandFinger::Pinky), vec![1.0; JOINTS]);
}

#[test]
fn transition_state_copies_surplus_bends() {
    let (_, hand) = build_hand();
    let finger = hand.finger(HandFinger::Index).unwrap();
    let target = FingerState::new(0.0, [1.0, 1.0, 1.0, 0.9, 0.8]);

    let state = HandDriver::transition_state(finger, &target, 0.5);
    assert_eq!(state.bends.to_vec(), vec![0.5, 0.5, 0.5, 0.9, 0.8]);
}

#[test]
fn update_with_settings_uses_transition_policy() {
    let (mut providers, mut driver, mut hand) = setup();
    let fist = providers.insert(uniform("fist", 1.0));
    driver.set_provider(Some(fist));

    let settings = RigSettings {
        transition: Transition::Smooth(0.5),
        ..Default::default()
    };
    driver.update_hand_with(&providers, &mut hand, &settings).unwrap();
    assert_eq!(bends(&hand, HandFinger::Thumb), vec![0.5; JOINTS]);

    driver.update_hand_with(&providers, &mut hand, &RigSettings::default()).unwrap();
    assert_eq!(bends(&hand, HandFinger::Thumb), vec![1.0; JOINTS]);
}

// ============================================================================
// Provider Lifecycle
// ============================================================================

#[test]
fn clearing_override_restores_default() {
    let (mut providers, mut driver, mut hand) = setup();
    let fist = providers.insert(uniform("fist", 1.0));

    driver.set_provider(Some(fist));
    assert!(driver.is_overridden());
    assert_eq!(driver.current_provider(), fist);
    driver.update_hand(&providers, &mut hand, f32::INFINITY).unwrap();

    driver.set_provider(None);
    assert!(!driver.is_overridden());
    assert_eq!(driver.current_provider(), driver.default_provider());
    driver.update_hand(&providers, &mut hand, f32::INFINITY).unwrap();
    assert_eq!(bends(&hand, HandFinger::Middle), vec![0.0; JOINTS]);
}

#[test]
fn new_override_replaces_previous() {
    let (mut providers, mut driver, mut hand) = setup();
    let a = providers.insert(uniform("a", 0.3));
    let b = providers.insert(uniform("b", 0.6));

    driver.set_provider(Some(a));
    driver.set_provider(Some(b));
    driver.update_hand(&providers, &mut hand, f32::INFINITY).unwrap();
    assert_eq!(bends(&hand, HandFinger::Index), vec![0.6; JOINTS]);
}

#[test]
fn stale_override_falls_back_to_default() {
    init_logging();
    let (mut providers, mut driver, mut hand) = setup();
    let gone = providers.insert(uniform("gone", 1.0));
    driver.set_provider(Some(gone));
    providers.remove(gone);

    assert!(driver.update_hand(&providers, &mut hand, f32::INFINITY).is_ok());
    assert_eq!(bends(&hand, HandFinger::Index), vec![0.0; JOINTS]);
}

#[test]
fn override_with_unknown_key_before_first_tick() {
    init_logging();
    let (providers, mut driver, mut hand) = setup();
    driver.set_provider(Some(ProviderKey::default()));
    assert!(driver.update_hand(&providers, &mut hand, f32::INFINITY).is_ok());
}

// ============================================================================
// Hand-level Fields
// ============================================================================

#[test]
fn hand_fields_follow_current_profile() {
    let (mut providers, mut driver, mut hand) = setup();
    let rotation = Quat::from_rotation_x(0.3);
    let hidden = providers.insert(
        uniform("hidden", 0.5)
            .with_visibility(false)
            .with_position_offset(Vec3::new(0.0, 0.1, 0.0))
            .with_rotation_offset(rotation),
    );

    driver.set_provider(Some(hidden));
    driver.update_hand(&providers, &mut hand, f32::INFINITY).unwrap();
    assert!(!hand.visible);
    assert_eq!(hand.position_offset, Vec3::new(0.0, 0.1, 0.0));
    assert_eq!(hand.rotation_offset, rotation);

    driver.set_provider(None);
    driver.update_hand(&providers, &mut hand, f32::INFINITY).unwrap();
    assert!(hand.visible);
    assert_eq!(hand.position_offset, Vec3::ZERO);
    assert_eq!(hand.rotation_offset, Quat::IDENTITY);
}

#[test]
fn hand_fields_untouched_without_overrides() {
    let (mut providers, mut driver, mut hand) = setup();
    let fingers_only = providers.insert(
        uniform("fingers only", 1.0)
            .with_overrides(HandOverrides::empty())
            .with_visibility(false),
    );
    hand.position_offset = Vec3::X;

    driver.set_provider(Some(fingers_only));
    driver.update_hand(&providers, &mut hand, f32::INFINITY).unwrap();
    assert!(hand.visible);
    assert_eq!(hand.position_offset, Vec3::X);
    assert_eq!(bends(&hand, HandFinger::Index), vec![1.0; JOINTS]);
}
