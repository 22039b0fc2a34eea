use vizij_reveal_core::{
    AnimationId, AnimationPhase, Change, Config, Engine, Inputs, Outputs, Part, RevealController,
    RevealError, RevealEvent, RevealState, ScrollOutcome, TargetId, TargetSpec, TriggerPath,
    Viewport,
};

fn engine(height: f32, scroll_top: f32) -> Engine {
    Engine::new(Config::default()).with_viewport(Viewport::new(height, scroll_top))
}

fn has_add(out: &Outputs, part: Part, class: &str) -> bool {
    out.changes.iter().any(|c| {
        matches!(c, Change::AddClass { part: p, class: k, .. } if *p == part && k == class)
    })
}

/// Step the engine one millisecond at a time until `Displayed` shows up for
/// `id`; returns the elapsed time.
fn ms_until_displayed(eng: &mut Engine, id: TargetId, limit: u64) -> Option<u64> {
    for elapsed in 0..=limit {
        let dt = if elapsed == 0 { 0 } else { 1 };
        if eng.update(dt, Inputs::default()).displayed_count(id) > 0 {
            return Some(elapsed);
        }
    }
    None
}

#[test]
fn non_inline_targets_produce_nothing() {
    for (offset, preview, intro) in [
        (100.0, false, None),
        (100.0, true, Some("slide")),
        (5000.0, false, Some("no_animation")),
        (5000.0, false, Some("slide")),
    ] {
        let mut eng = engine(800.0, 0.0);
        let id = eng.register(TargetSpec {
            inline: false,
            preview,
            intro: intro.map(str::to_string),
            offset_top: offset,
        });
        assert!(eng.invoke(id).unwrap().is_empty());
        for scroll in [0.0, 2500.0, 6000.0] {
            assert!(eng.update(250, Inputs::scrolled([scroll])).is_empty());
        }
        assert_eq!(eng.snapshot(id).unwrap().state, RevealState::Hidden);
        assert_eq!(eng.pending_timers(), 0);
        assert!(!eng.is_watching_scroll(id));
    }
}

#[test]
fn entry_resets_shown_and_sets_opacity_first() {
    let mut eng = engine(800.0, 0.0);
    let id = eng.register(TargetSpec::inline(100.0).with_intro("slide"));
    let out = eng.invoke(id).unwrap();
    assert_eq!(
        out.changes[0],
        Change::RemoveClass {
            target: id,
            part: Part::Root,
            class: "hustle-show".into()
        }
    );
    assert_eq!(
        out.changes[1],
        Change::SetOpacity {
            target: id,
            opacity: 1.0
        }
    );
}

#[test]
fn in_view_or_preview_displays_after_200() {
    let cases = [
        TargetSpec::inline(100.0),
        TargetSpec::inline(100.0).with_intro("slide"),
        TargetSpec::inline(100.0).with_intro("no_animation"),
        TargetSpec::inline(4000.0).with_preview(true),
        TargetSpec::inline(4000.0).with_preview(true).with_intro("zoom"),
    ];
    for spec in cases {
        let mut eng = engine(800.0, 0.0);
        let id = eng.register(spec.clone());
        let out = eng.invoke(id).unwrap();
        assert!(has_add(out, Part::Root, "hustle-show"), "{spec:?}");
        assert_eq!(ms_until_displayed(&mut eng, id, 1000), Some(200), "{spec:?}");
        assert_eq!(
            eng.snapshot(id).unwrap().trigger,
            Some(TriggerPath::InitialView)
        );
    }
}

#[test]
fn off_screen_without_animation_displays_after_100_without_scroll() {
    for intro in [None, Some(""), Some("no_animation")] {
        let mut eng = engine(800.0, 0.0);
        let mut spec = TargetSpec::inline(5000.0);
        spec.intro = intro.map(str::to_string);
        let id = eng.register(spec);
        let out = eng.invoke(id).unwrap();
        assert!(has_add(out, Part::Root, "hustle-show"));
        assert!(!has_add(out, Part::Content, "hustle-animate"));
        assert!(!eng.is_watching_scroll(id));
        assert_eq!(ms_until_displayed(&mut eng, id, 1000), Some(100), "{intro:?}");
        assert_eq!(eng.snapshot(id).unwrap().phase, AnimationPhase::None);
    }
}

#[test]
fn named_off_screen_waits_for_scroll_and_fires_once() {
    let mut eng = engine(800.0, 0.0);
    let id = eng.register(TargetSpec::inline(5000.0).with_intro("slide"));

    let out = eng.invoke(id).unwrap();
    assert!(has_add(out, Part::Content, "hustle-animate"));
    assert!(!has_add(out, Part::Root, "hustle-show"));
    assert!(eng.is_watching_scroll(id));

    // Time alone never reveals a scroll-gated target.
    assert!(eng.update(10_000, Inputs::default()).is_empty());

    let out = eng.update(0, Inputs::scrolled([4100.0])).clone();
    assert!(out.is_empty());
    assert_eq!(
        eng.snapshot(id).unwrap().state,
        RevealState::WaitingForScroll
    );

    // Several samples in one tick: only the first crossing triggers.
    let out = eng
        .update(0, Inputs::scrolled([4201.0, 4300.0, 4900.0]))
        .clone();
    let shows = out
        .changes
        .iter()
        .filter(|c| matches!(c, Change::AddClass { class, .. } if class == "hustle-show"))
        .count();
    assert_eq!(shows, 1);
    assert!(!eng.is_watching_scroll(id));
    assert_eq!(eng.pending_timers(), 1);

    let mut displayed = 0;
    let mut played = 0;
    for _ in 0..300 {
        let out = eng.update(1, Inputs::scrolled([5000.0])).clone();
        displayed += out.displayed_count(id);
        played += out
            .changes
            .iter()
            .filter(|c| has_class_change(c, "hustle-animate-in--slide"))
            .count();
    }
    assert_eq!(displayed, 1);
    assert_eq!(played, 1);
    assert_eq!(eng.snapshot(id).unwrap().state, RevealState::Revealed);
}

fn has_class_change(change: &Change, name: &str) -> bool {
    matches!(change, Change::AddClass { class, .. } if class == name)
}

#[test]
fn crossing_at_offset_5000_with_viewport_800() {
    let mut eng = engine(800.0, 0.0);
    let id = eng.register(TargetSpec::inline(5000.0).with_intro("slide"));

    let out = eng.invoke(id).unwrap();
    assert!(has_add(out, Part::Content, "hustle-animate"));
    assert!(!has_add(out, Part::Root, "hustle-show"));

    assert!(eng.update(0, Inputs::scrolled([4100.0])).is_empty());

    let out = eng.update(0, Inputs::scrolled([4201.0]));
    assert!(has_add(out, Part::Root, "hustle-show"));
    assert_eq!(out.displayed_count(id), 0);

    assert!(eng.update(99, Inputs::default()).is_empty());
    let out = eng.update(1, Inputs::default());
    assert!(has_add(out, Part::Content, "hustle-animate-in--slide"));
    assert_eq!(
        out.events,
        vec![RevealEvent::Displayed {
            target: id,
            animation: Some("slide".into()),
            at_ms: 100
        }]
    );
}

#[test]
fn offset_100_is_in_initial_view() {
    for intro in ["slide", "no_animation"] {
        let mut eng = engine(800.0, 0.0);
        let id = eng.register(TargetSpec::inline(100.0).with_intro(intro));
        assert!(has_add(eng.invoke(id).unwrap(), Part::Root, "hustle-show"));
        assert_eq!(ms_until_displayed(&mut eng, id, 500), Some(200));
    }
}

#[test]
fn duplicated_load_yields_single_notification() {
    let cfg = Config::default();
    let mut ctl = RevealController::new(
        TargetId(3),
        TargetSpec::inline(5000.0).with_intro("slide"),
        &cfg,
    );
    let mut out = Outputs::default();
    let vp = Viewport::new(800.0, 0.0);
    assert_eq!(ctl.invoke(&vp, &cfg, &mut out), None);

    // Two trigger paths racing: a scroll crossing and a direct load.
    let crossed = vp.scrolled_to(4500.0);
    assert_eq!(
        ctl.on_scroll(&crossed, &cfg, &mut out),
        ScrollOutcome::Triggered { delay_ms: 100 }
    );
    assert_eq!(ctl.load(100, &cfg, &mut out), None);
    assert_eq!(ctl.on_scroll(&crossed, &cfg, &mut out), ScrollOutcome::Ignored);

    assert!(ctl.complete(100, &cfg, &mut out));
    assert!(!ctl.complete(100, &cfg, &mut out));

    assert_eq!(out.displayed_count(TargetId(3)), 1);
    let played = out
        .changes
        .iter()
        .filter(|c| has_class_change(c, "hustle-animate-in--slide"))
        .count();
    assert_eq!(played, 1);
}

#[test]
fn load_before_invoke_does_not_skip_entry_or_prepare() {
    let cfg = Config::default();
    let mut ctl = RevealController::new(
        TargetId(1),
        TargetSpec::inline(100.0).with_intro("slide"),
        &cfg,
    );
    let mut out = Outputs::default();
    assert_eq!(ctl.load(100, &cfg, &mut out), None);
    assert!(out.is_empty());
    assert_eq!(ctl.state(), RevealState::Hidden);
    assert_eq!(ctl.phase(), AnimationPhase::None);

    assert_eq!(ctl.invoke(&Viewport::new(800.0, 0.0), &cfg, &mut out), Some(200));
    assert_eq!(ctl.trigger(), Some(TriggerPath::InitialView));
    assert!(has_add(&out, Part::Content, "hustle-animate"));
    assert!(has_add(&out, Part::Root, "hustle-show"));
    assert_eq!(ctl.phase(), AnimationPhase::Prepared);

    assert!(ctl.complete(200, &cfg, &mut out));
    assert!(has_add(&out, Part::Content, "hustle-animate-in--slide"));
    assert_eq!(ctl.phase(), AnimationPhase::Played);
    assert_eq!(out.displayed_count(TargetId(1)), 1);
}

#[test]
fn intro_with_inner_whitespace_emits_single_token_classes() {
    let mut eng = engine(800.0, 0.0);
    let id = eng.register(TargetSpec::inline(100.0).with_intro(" slide  left "));
    assert_eq!(
        eng.snapshot(id).unwrap().animation,
        AnimationId::Named("slide  left".into())
    );
    eng.invoke(id).unwrap();

    let out = eng.update(200, Inputs::default());
    assert_eq!(out.displayed_count(id), 1);
    assert!(has_add(out, Part::Content, "hustle-animate-in--slide"));
    assert!(has_add(out, Part::Content, "left"));
    for change in &out.changes {
        if let Change::AddClass { class, .. } | Change::RemoveClass { class, .. } = change {
            assert!(!class.is_empty());
            assert!(!class.contains(char::is_whitespace), "{class:?}");
        }
    }
}

#[test]
fn reinvoke_does_not_restart_sequence() {
    let mut eng = engine(800.0, 0.0);
    let id = eng.register(TargetSpec::inline(100.0));
    eng.invoke(id).unwrap();
    assert_eq!(eng.update(200, Inputs::default()).displayed_count(id), 1);
    assert!(eng.invoke(id).unwrap().is_empty());
    assert!(eng.update(1000, Inputs::default()).is_empty());
}

#[test]
fn targets_are_independent() {
    let mut eng = engine(800.0, 0.0);
    let near = eng.register(TargetSpec::inline(200.0).with_intro("fade"));
    let far = eng.register(TargetSpec::inline(3000.0).with_intro("slide"));
    let bare = eng.register(TargetSpec::inline(3000.0));
    let skipped = eng.register(TargetSpec::default());

    let out = eng.invoke_all().clone();
    assert!(out.changes_for(skipped).next().is_none());
    assert!(has_add(&out, Part::Root, "hustle-show"));
    assert!(eng.is_watching_scroll(far));
    assert!(!eng.is_watching_scroll(near));

    let out = eng.update(100, Inputs::default()).clone();
    assert_eq!(out.displayed_count(bare), 1);
    assert_eq!(out.displayed_count(near), 0);

    // Crossing lands mid-way; its timer shares a deadline with `near`.
    let out = eng.update(50, Inputs::scrolled([2200.0])).clone();
    assert_eq!(out.events.len(), 0);
    assert_eq!(eng.snapshot(far).unwrap().state, RevealState::Revealing);

    let out = eng.update(50, Inputs::default()).clone();
    assert_eq!(out.displayed_count(near), 1);
    assert_eq!(out.displayed_count(far), 1);
    assert_eq!(out.events.len(), 2);

    assert!(eng.update(1000, Inputs::scrolled([0.0, 4000.0])).is_empty());
}

#[test]
fn unknown_target_is_an_error() {
    let mut eng = Engine::default();
    assert_eq!(
        eng.invoke(TargetId(42)).unwrap_err(),
        RevealError::UnknownTarget(TargetId(42))
    );
    assert!(eng.snapshot(TargetId(0)).is_err());
}

#[test]
fn custom_config_drives_names_and_delays() {
    let mut cfg = Config::default();
    cfg.in_view_delay_ms = 50;
    cfg.classes.shown = "is-visible".into();
    cfg.classes.animate_in_prefix = "enter-".into();
    cfg.no_animation = "none".into();

    let mut eng = Engine::new(cfg).with_viewport(Viewport::new(900.0, 0.0));
    let named = eng.register(TargetSpec::inline(10.0).with_intro("pop"));
    let sentinel = eng.register(TargetSpec::inline(10.0).with_intro("none"));
    assert_eq!(
        eng.controller(sentinel).unwrap().animation(),
        &AnimationId::None
    );

    assert!(has_add(eng.invoke_all(), Part::Root, "is-visible"));
    let out = eng.update(50, Inputs::default());
    assert!(has_add(out, Part::Content, "enter-pop"));
    assert_eq!(out.displayed_count(named), 1);
    assert_eq!(out.displayed_count(sentinel), 1);
}

#[test]
fn outputs_serialize_with_kind_tags() {
    let mut eng = engine(800.0, 0.0);
    let id = eng.register(TargetSpec::inline(0.0).with_intro("slide"));
    let json = serde_json::to_value(eng.invoke(id).unwrap()).unwrap();
    assert_eq!(json["changes"][0]["kind"], "remove_class");
    assert_eq!(json["changes"][2]["part"], "content");
    let json = serde_json::to_value(eng.update(200, Inputs::default())).unwrap();
    assert_eq!(json["events"][0]["kind"], "displayed");
    assert_eq!(json["events"][0]["animation"], "slide");
}
