use std::sync::Arc;

use behavior_tree::{Behavior, ParallelPolicy, Status};
use combat_ai::world::{DeviceClass, InMemoryScene, Side, UnitClass, Vector2, Weapon, WeaponType};
use combat_ai::{
    AiLevel, AiSettings, Context, NodeDefinition, NodeKind, Requirement, ShipId, ShipSpec,
    ShipState, TreeBuilder, TreeDefinition, TreeLibrary, TreeLoader,
};

fn gunship() -> ShipSpec {
    ShipSpec {
        weapons: vec![Weapon::new(0, WeaponType::Projectile, 12.0)],
        ..ShipSpec::default()
    }
}

fn node(source: &str) -> NodeDefinition {
    ron::from_str(source).unwrap()
}

#[test]
fn empty_composites_collapse_to_constants() {
    let spec = gunship();
    let settings = AiSettings::default();
    let mut builder = TreeBuilder::new(ShipId(1), &spec, &settings);

    let cases = [
        ("(kind: Selector(nodes: []))", Some(Status::Failure)),
        ("(kind: Sequence(nodes: []))", Some(Status::Success)),
        ("(kind: Parallel(nodes: []))", Some(Status::Success)),
        ("(kind: RandomSelector(nodes: [], cooldown: 1.0))", Some(Status::Failure)),
        ("(kind: RandomExecutor(nodes: [], cooldown: 1.0))", Some(Status::Failure)),
    ];
    for (source, expected) in cases {
        assert_eq!(builder.build(Some(&node(source))).constant(), expected, "{source}");
    }
}

#[test]
fn single_child_composites_unwrap() {
    let spec = gunship();
    let settings = AiSettings::default();
    let mut builder = TreeBuilder::new(ShipId(1), &spec, &settings);

    for composite in [
        "Selector(nodes: [(kind: Attack)])",
        "Sequence(nodes: [(kind: Attack)])",
        "Parallel(nodes: [(kind: Attack)])",
        "RandomSelector(nodes: [(kind: Attack)], cooldown: 0.0)",
    ] {
        let compiled = builder.build(Some(&node(&format!("(kind: {composite})"))));
        assert_eq!(compiled.name(), "Attack", "{composite}");
    }
}

#[test]
fn sequence_after_constant_failure_is_dropped() {
    let spec = gunship();
    let settings = AiSettings::default();
    let mut builder = TreeBuilder::new(ShipId(1), &spec, &settings);

    // SpawnDrones fails statically without drone bays.
    let definition = node(
        "(kind: Sequence(nodes: [(kind: Undefined), (kind: SpawnDrones), (kind: Attack)]))",
    );
    assert_eq!(
        builder.build(Some(&definition)).constant(),
        Some(Status::Failure)
    );
}

#[test]
fn decorators_fold_over_constants() {
    let spec = gunship();
    let settings = AiSettings::default();
    let mut builder = TreeBuilder::new(ShipId(1), &spec, &settings);

    let inverted = node("(kind: Inverter(node: Some((kind: Undefined))))");
    assert_eq!(builder.build(Some(&inverted)).constant(), Some(Status::Failure));

    let missing = node("(kind: Inverter(node: None))");
    assert_eq!(builder.build(Some(&missing)).constant(), Some(Status::Success));

    let forced = node("(kind: ConstantResult(node: Some((kind: SpawnDrones)), result: Success))");
    assert_eq!(builder.build(Some(&forced)).constant(), Some(Status::Success));

    let latched = node("(kind: CompleteOnce(node: Some((kind: Attack))))");
    assert_eq!(builder.build(Some(&latched)).name(), "CompleteOnce");
}

#[test]
fn requirements_follow_loadout_and_level() {
    let mut spec = gunship();
    spec.class = UnitClass::Drone;
    spec.devices.push(combat_ai::world::Device {
        slot: 0,
        class: DeviceClass::Cloaking,
    });
    let settings = AiSettings {
        level: AiLevel::Hard,
        ..AiSettings::default()
    };
    let mut builder = TreeBuilder::new(ShipId(1), &spec, &settings);

    let admitted = [
        Requirement::IsDrone,
        Requirement::HasDevice(DeviceClass::Cloaking),
        Requirement::AiLevel {
            min: AiLevel::Medium,
            max: AiLevel::Expert,
        },
        Requirement::All(vec![Requirement::HasWeapons, Requirement::IsDrone]),
    ];
    for requirement in admitted {
        let definition = NodeDefinition::new(NodeKind::Attack).with_requirement(requirement.clone());
        assert_eq!(builder.build(Some(&definition)).name(), "Attack", "{requirement:?}");
    }

    let rejected = [
        Requirement::IsShip,
        Requirement::HasDroneBays,
        Requirement::AiLevel {
            min: AiLevel::Easy,
            max: AiLevel::Medium,
        },
        Requirement::Not(Box::new(Requirement::HasWeapons)),
    ];
    for requirement in rejected {
        let definition = NodeDefinition::new(NodeKind::Attack).with_requirement(requirement.clone());
        assert_eq!(
            builder.build(Some(&definition)).constant(),
            Some(Status::Failure),
            "{requirement:?}"
        );
    }
}

#[test]
fn subtrees_resolve_through_library() {
    let library = TreeLoader::parse_library(
        r#"{
            "main": (
                parallel_policy: RequireAny,
                root: Some((kind: Selector(nodes: [
                    (kind: SubTree(tree: "fight")),
                    (kind: Wait(cooldown: 1.0)),
                ]))),
            ),
            "fight": (
                root: Some((kind: Parallel(nodes: [(kind: Chase), (kind: Attack)]))),
            ),
        }"#,
    )
    .unwrap();
    assert!(library.validate().is_empty());
    assert_eq!(library.get("main").unwrap().parallel_policy, ParallelPolicy::RequireAny);

    let spec = gunship();
    let settings = AiSettings::default();
    let mut builder = TreeBuilder::new(ShipId(1), &spec, &settings).with_library(&library);
    assert_eq!(builder.build_named("main").name(), "Selector");
    assert_eq!(builder.build_named("fight").name(), "Parallel");
}

#[test]
fn subtree_without_library_fails() {
    let spec = gunship();
    let settings = AiSettings::default();
    let mut builder = TreeBuilder::new(ShipId(1), &spec, &settings);

    let tree = TreeDefinition::new(NodeKind::SubTree { tree: "any".into() }.into());
    assert_eq!(builder.build_tree(&tree).constant(), Some(Status::Failure));

    let empty = TreeLibrary::new();
    let mut builder = TreeBuilder::new(ShipId(1), &spec, &settings).with_library(&empty);
    assert_eq!(builder.build_tree(&tree).constant(), Some(Status::Failure));
}

#[test]
fn non_finite_parameters_compile_to_failure() {
    let spec = gunship();
    let settings = AiSettings::default();
    let mut builder = TreeBuilder::new(ShipId(1), &spec, &settings);

    let parsed = node("(kind: FindEnemy(min_cooldown: 1.0, max_cooldown: inf))");
    assert_eq!(builder.build(Some(&parsed)).constant(), Some(Status::Failure));

    let kinds = [
        NodeKind::FlyAroundMothership {
            min_distance: 3.0,
            max_distance: f32::INFINITY,
        },
        NodeKind::MoveToAttackRange {
            min_max_lerp: f32::NAN,
            multiplier: 1.0,
        },
        NodeKind::Wait {
            cooldown: f32::NEG_INFINITY,
            reset_if_interrupted: false,
        },
        NodeKind::RandomSelector {
            nodes: vec![NodeKind::Attack.into(), NodeKind::Chase.into()],
            cooldown: f32::NAN,
            policy: Default::default(),
        },
    ];
    for kind in kinds {
        let name = kind.name();
        let compiled = builder.build(Some(&kind.into()));
        assert_eq!(compiled.constant(), Some(Status::Failure), "{name}");
    }

    // A bad leaf inside a selector is dropped like any other failing child.
    let selector = NodeDefinition::selector(vec![parsed, NodeKind::Attack.into()]);
    assert_eq!(builder.build(Some(&selector)).name(), "Attack");
}

/// `Parallel[FindEnemy, Wait]` with no enemy: one child fails, one succeeds.
fn split_parallel(policy: Option<ParallelPolicy>) -> NodeDefinition {
    NodeKind::Parallel {
        nodes: vec![
            NodeKind::FindEnemy {
                min_cooldown: 1.0,
                max_cooldown: 1.0,
                in_attack_range: false,
                ignore_drones: false,
            }
            .into(),
            NodeKind::Wait {
                cooldown: 1.0,
                reset_if_interrupted: false,
            }
            .into(),
        ],
        policy,
    }
    .into()
}

fn tick_once(tree: &TreeDefinition) -> Status {
    let spec = gunship();
    let settings = AiSettings::default();
    let scene = Arc::new(InMemoryScene::new());
    scene.add_ship(ShipState::new(ShipId(1), Vector2::ZERO), Side(0));

    let mut root = TreeBuilder::new(ShipId(1), &spec, &settings).build_tree(tree);
    let mut ctx = Context::new(ShipId(1), &spec, scene).with_seed(Some(1));
    ctx.update(0.1);
    root.tick(&mut ctx)
}

#[test]
fn parallel_policy_comes_from_tree_or_node() {
    let tree_any = TreeDefinition {
        parallel_policy: ParallelPolicy::RequireAny,
        root: Some(split_parallel(None)),
    };
    assert_eq!(tick_once(&tree_any), Status::Success);

    let tree_all = TreeDefinition::new(split_parallel(None));
    assert_eq!(tree_all.parallel_policy, ParallelPolicy::RequireAll);
    assert_eq!(tick_once(&tree_all), Status::Failure);

    let node_any = TreeDefinition::new(split_parallel(Some(ParallelPolicy::RequireAny)));
    assert_eq!(tick_once(&node_any), Status::Success);

    let node_all = TreeDefinition {
        parallel_policy: ParallelPolicy::RequireAny,
        root: Some(split_parallel(Some(ParallelPolicy::RequireAll))),
    };
    assert_eq!(tick_once(&node_all), Status::Failure);
}
