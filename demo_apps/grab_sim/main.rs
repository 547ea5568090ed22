//! Headless grab simulation.
//!
//! Builds a five-finger hand rig, then replays a short interaction script:
//! idle, grab a mug, squeeze it, release it, then drive the hand from
//! controller actions. Finger poses are logged every few ticks.
//!
//! Run with `RUST_LOG=info cargo run -p grab_sim` (or `debug` to see
//! provider swaps).

use anyhow::Result;
use glam::Quat;
use vrhand::prelude::*;

const JOINTS_PER_FINGER: usize = 3;
const TICKS_PER_PHASE: usize = 12;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = RigSettings {
        transition: Transition::Smooth(0.3),
        ..Default::default()
    };

    let (mut rig, mut hand) = build_hand(&settings)?;
    if !hand.validate_logged(&rig) {
        anyhow::bail!("hand rig is invalid");
    }

    // === Providers ===

    let mut providers = ProviderSet::new();
    let rest = providers.insert(StateProvider::rest(settings.rest_bend_count));

    let hold = fist("mug hold", 0.6).with_finger(HandFinger::Index, FingerState::new(0.0, [0.3, 0.2, 0.1]));
    let squeeze = HandProfile::new("mug squeeze").with_finger(HandFinger::Index, FingerState::new(0.0, [0.9, 0.9, 0.8]));
    let mug_provider = providers.insert(SelectActivateProvider::new(hold, squeeze));

    let controller = providers.insert(
        ActionBasedProvider::new(HandProfile::rest(JOINTS_PER_FINGER))
            .with_action("grip", fist("grip", 1.0))
            .with_action(
                "trigger",
                HandProfile::new("trigger").with_finger(HandFinger::Index, FingerState::new(0.0, [1.0, 1.0, 1.0])),
            ),
    );

    let mut router = InteractionRouter::new();
    let mug = router.register("mug", Some(mug_provider));
    let table = router.register("table", None);

    let mut driver = HandDriver::new(rest);

    // === Script ===

    run_phase("idle", &driver, &providers, &mut hand, &mut rig, &settings)?;

    router.select_entered(&mut driver, table);
    router.select_entered(&mut driver, mug);
    run_phase("holding mug", &driver, &providers, &mut hand, &mut rig, &settings)?;

    router.activated(&mut providers, mug);
    run_phase("squeezing mug", &driver, &providers, &mut hand, &mut rig, &settings)?;

    router.deactivated(&mut providers, mug);
    router.select_exited(&mut driver, mug);
    run_phase("released", &driver, &providers, &mut hand, &mut rig, &settings)?;

    driver.set_provider(Some(controller));
    if let Some(actions) = providers.get_mut(controller).and_then(StateProvider::as_action_based_mut) {
        actions.action_started("grip");
        actions.action_performed("grip");
        actions.action_performed("trigger");
    }
    run_phase("controller grip + trigger", &driver, &providers, &mut hand, &mut rig, &settings)?;

    if let Some(actions) = providers.get_mut(controller).and_then(StateProvider::as_action_based_mut) {
        actions.action_canceled("grip");
    }
    run_phase("controller trigger only", &driver, &providers, &mut hand, &mut rig, &settings)?;

    driver.set_provider(None);
    driver.update_hand(&providers, &mut hand, f32::INFINITY)?;
    let written = hand.write_pose(&mut rig);
    log::info!("Snapped back to rest, {written} nodes written");
    log_hand(&hand);

    Ok(())
}

/// Palm with five fingers, each a straight chain of joints.
fn build_hand(settings: &RigSettings) -> Result<(Rig, Hand)> {
    let mut rig = Rig::new();
    let palm = rig.create_node("palm");
    let mut hand = Hand::new().with_anchor(palm);

    for (i, name) in HandFinger::iter().enumerate() {
        let spread = (i as f32 - 2.0) * 0.15;
        let rest_rotation = Quat::from_rotation_y(spread);

        let root = rig.create_joint(
            &format!("{name}_0"),
            JointSpec::new(Axis::X, settings.default_bend_angle, rest_rotation),
        );
        rig.attach(root, palm);

        let mut parent = root;
        for j in 1..JOINTS_PER_FINGER {
            let joint = rig.create_joint(&format!("{name}_{j}"), JointSpec::from_settings(settings));
            rig.attach(joint, parent);
            parent = joint;
        }

        let chain = JointChain::detect(&rig, root);
        if chain.len() != JOINTS_PER_FINGER {
            anyhow::bail!("detected {} joints for {name}, expected {JOINTS_PER_FINGER}", chain.len());
        }

        let tilt = TiltSpec::from_settings(rest_rotation, settings);
        hand.add_finger(Finger::new(name, root, tilt, chain));
    }

    log::info!("Built hand rig with {} nodes", rig.len());
    Ok((rig, hand))
}

fn fist(name: &str, bend: f32) -> HandProfile {
    HandFinger::iter().fold(HandProfile::new(name), |profile, finger| {
        profile.with_finger(finger, FingerState::new(0.0, [bend; JOINTS_PER_FINGER]))
    })
}

fn run_phase(
    label: &str,
    driver: &HandDriver,
    providers: &ProviderSet,
    hand: &mut Hand,
    rig: &mut Rig,
    settings: &RigSettings,
) -> Result<()> {
    log::info!("--- {label} ---");
    for tick in 0..TICKS_PER_PHASE {
        driver.update_hand_with(providers, hand, settings)?;
        hand.write_pose(rig);
        if tick % 4 == 3 {
            log_hand(hand);
        }
    }
    Ok(())
}

fn log_hand(hand: &Hand) {
    for finger in hand.fingers() {
        let bends: Vec<String> = finger.chain().bends().map(|b| format!("{b:.2}")).collect();
        log::info!("{:>6}: tilt {:+.2} bends [{}]", finger.name(), finger.tilt(), bends.join(", "));
    }
}
