use std::time::{Duration, Instant};

use quest_core::motion::{
    Channel, ElementBounds, Easing, InterpolationMap, KeyframePair, Keyframe, MotionScene,
    RevealAnimator, RevealNode, RevealPhase, ScrollParallax, ScrollRange, Stagger, StaggerGroup,
    StyleValues, Transition, TriggerMode, Variant, Viewport,
};
use quest_core::{AppConfig, Presets};

fn fade(duration: f64) -> Variant {
    Variant::new(
        KeyframePair::new(
            Keyframe::new().opacity(0.0).y(40.0),
            Keyframe::new().opacity(1.0).y(0.0),
        )
        .unwrap(),
        Transition::new(duration, Easing::Linear).unwrap(),
    )
    .unwrap()
}

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

#[test]
fn once_reveal_stays_visible_after_reentry() {
    let mut reveal = RevealAnimator::new(fade(0.5), TriggerMode::Once);
    let t0 = Instant::now();

    assert!(reveal.set_in_view(true, t0));
    reveal.update(t0 + secs(1.0));
    assert_eq!(reveal.phase(), RevealPhase::Settled);

    assert!(!reveal.set_in_view(false, t0 + secs(2.0)));
    assert!(!reveal.set_in_view(true, t0 + secs(3.0)));
    assert_eq!(reveal.phase(), RevealPhase::Settled);
    assert_eq!(reveal.update(t0 + secs(3.0))[0], StyleValues::IDENTITY);
}

#[test]
fn always_reveal_reverts_on_exit() {
    let mut reveal = RevealAnimator::new(fade(0.5), TriggerMode::Always);
    let t0 = Instant::now();

    reveal.set_in_view(true, t0);
    assert_eq!(reveal.update(t0 + secs(1.0))[0], StyleValues::IDENTITY);

    reveal.set_in_view(false, t0 + secs(1.5));
    assert_eq!(reveal.phase(), RevealPhase::Untriggered);
    assert_eq!(reveal.update(t0 + secs(1.5))[0], StyleValues::new(0.0, 40.0, 1.0));

    assert!(reveal.set_in_view(true, t0 + secs(2.0)));
    assert_eq!(reveal.phase(), RevealPhase::Animating);
}

#[test]
fn stagger_children_start_in_order() {
    let group = StaggerGroup::new(Variant::identity(), Stagger::new(0.12, 0.1).unwrap())
        .unwrap()
        .children_from((0..4).map(|_| fade(0.6)));
    let delays = RevealNode::from(group.clone()).delays();
    for (i, delay) in delays[1..].iter().enumerate() {
        assert!((delay - (0.1 + 0.12 * i as f64)).abs() < 1e-12, "child {}", i);
    }

    // 0.2s in: child 0 has been running for 0.1s, child 1 is about to start
    let mut reveal = RevealAnimator::new(group, TriggerMode::Once);
    let t0 = Instant::now();
    reveal.set_in_view(true, t0);
    let values = reveal.update(t0 + secs(0.2));
    assert!(values[1].opacity > 0.0);
    assert_eq!(values[3].opacity, 0.0);
    assert_eq!(values[4].opacity, 0.0);

    // everything settles once the last child finishes
    let settle = 0.1 + 0.12 * 3.0 + 0.6;
    let values = reveal.update(t0 + secs(settle + 0.01));
    assert!(values.iter().all(|v| *v == StyleValues::IDENTITY));
    assert_eq!(reveal.phase(), RevealPhase::Settled);
}

#[test]
fn parallax_linear_range() {
    let parallax = ScrollParallax::fixed(ScrollRange::new(0.0, 1000.0).unwrap())
        .channel(Channel::TranslateY, "0:0,1:100".parse::<InterpolationMap>().unwrap());
    let bounds = ElementBounds::default();

    assert_eq!(parallax.sample(500.0, &bounds, 800.0).values[0], 50.0);
    assert_eq!(parallax.sample(1500.0, &bounds, 800.0).values[0], 100.0);
    assert_eq!(parallax.sample(-200.0, &bounds, 800.0).values[0], 0.0);
}

#[test]
fn parallax_is_deterministic() {
    let presets = Presets::from_config(&AppConfig::default().motion).unwrap();
    let mut hero = presets.hero_parallax();
    let bounds = ElementBounds::new(0.0, 900.0);

    let a = hero.update(321.5, &bounds, 700.0).clone();
    let b = hero.update(321.5, &bounds, 700.0).clone();
    let c = presets.hero_parallax().sample(321.5, &bounds, 700.0);
    assert_eq!(a, b);
    assert_eq!(a, c);
}

#[test]
fn page_scene_reveals_sections_as_they_scroll_in() {
    let presets = Presets::from_config(&AppConfig::default().motion).unwrap();
    let scene = MotionScene::new();
    let t0 = Instant::now();

    let navbar = scene.mount_reveal("navbar", presets.navbar_intro(), ElementBounds::new(0.0, 64.0), t0);
    let hero = scene.mount_parallax("hero", presets.hero_parallax(), ElementBounds::new(0.0, 900.0));
    let features = scene.mount_reveal(
        "features",
        presets.in_view(presets.fade_group(3), presets.section_margin()),
        ElementBounds::new(1600.0, 300.0),
        t0,
    );

    let top = scene.dispatch(&Viewport::new(0.0, 800.0), t0 + secs(0.1));
    assert!(top.get(navbar.id()).unwrap().root().opacity > 0.0);
    assert_eq!(top.get(hero.id()).unwrap().root(), StyleValues::IDENTITY);
    let hidden = top.get(features.id()).unwrap();
    assert_eq!(hidden.values.len(), 4);
    assert!(hidden.values.iter().all(|v| v.opacity == 0.0));

    // features header well inside the viewport
    let scrolled = scene.dispatch(&Viewport::new(1200.0, 800.0), t0 + secs(1.0));
    assert!(scene.is_animating());
    let hero_style = scrolled.get(hero.id()).unwrap().root();
    assert_eq!(hero_style.translate_y, 100.0);
    assert_eq!(hero_style.opacity, 0.0);

    let later = scene.dispatch(&Viewport::new(1200.0, 800.0), t0 + secs(3.0));
    assert!(later
        .get(features.id())
        .unwrap()
        .values
        .iter()
        .all(|v| *v == StyleValues::IDENTITY));
}

#[test]
fn dropped_subscription_stops_receiving_frames() {
    let scene = MotionScene::new();
    let t0 = Instant::now();
    let sub = scene.mount_reveal(
        "card",
        RevealAnimator::new(fade(0.3), TriggerMode::Always),
        ElementBounds::new(100.0, 100.0),
        t0,
    );
    let id = sub.id();
    scene.dispatch(&Viewport::new(0.0, 800.0), t0);

    drop(sub);
    let frame = scene.dispatch(&Viewport::new(0.0, 800.0), t0 + secs(0.1));
    assert!(frame.get(id).is_none());
    assert!(scene.is_empty());
}
