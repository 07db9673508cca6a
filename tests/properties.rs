//! Property tests over randomly shaped bundles, dangling references included.
mod common;
use common::*;
use profiler_graph::entity::{EntitySnapshot, TaskOutput};
use profiler_graph::prelude::*;
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::sample::Index;

#[derive(Debug, Clone)]
struct BundleShape {
    app_count: usize,
    workspaces: Vec<Vec<usize>>,
    references: Vec<(usize, usize)>,
    dashboards: Vec<(Vec<usize>, Vec<(u8, usize)>)>,
    reports: Vec<Vec<usize>>,
    tasks: Vec<(Option<usize>, Vec<(u8, usize)>)>,
}

impl BundleShape {
    /// Indexes may point past the generated entities on purpose.
    fn to_snapshot(&self) -> EntitySnapshot {
        let app = |i: usize| format!("app-{}", i);

        let applications = (0..self.app_count)
            .map(|i| {
                let targets: Vec<String> = self
                    .references
                    .iter()
                    .filter(|(from, _)| *from == i)
                    .map(|(_, to)| app(*to))
                    .collect();
                let targets: Vec<&str> = targets.iter().map(String::as_str).collect();
                application_referencing(&app(i), &targets)
            })
            .collect();

        let workspaces = self
            .workspaces
            .iter()
            .enumerate()
            .map(|(i, hosted)| {
                let hosted: Vec<String> = hosted.iter().map(|a| app(*a)).collect();
                let hosted: Vec<&str> = hosted.iter().map(String::as_str).collect();
                workspace(&format!("ws-{}", i), &hosted)
            })
            .collect();

        let dashboards = self
            .dashboards
            .iter()
            .enumerate()
            .map(|(i, (placed_in, cards))| {
                let id = format!("dash-{}", i);
                let placed_in: Vec<String> =
                    placed_in.iter().map(|w| format!("ws-{}", w)).collect();
                let placed_in: Vec<&str> = placed_in.iter().map(String::as_str).collect();
                let items = cards
                    .iter()
                    .enumerate()
                    .map(|(n, (kind, target))| {
                        let card_id = format!("{}-card-{}", id, n);
                        match kind {
                            0 => html_card(&card_id),
                            1 => usage_card(&card_id, &[app(*target).as_str()]),
                            _ => report_card(&card_id, &format!("rep-{}", target)),
                        }
                    })
                    .collect();
                dashboard(&id, &placed_in, items)
            })
            .collect();

        let reports = self
            .reports
            .iter()
            .enumerate()
            .map(|(i, owners)| {
                let owners: Vec<String> = owners.iter().map(|a| app(*a)).collect();
                let owners: Vec<&str> = owners.iter().map(String::as_str).collect();
                report(&format!("rep-{}", i), &owners)
            })
            .collect();

        let tasks = self
            .tasks
            .iter()
            .enumerate()
            .map(|(i, (owner, outputs))| {
                let outputs: Vec<TaskOutput> = outputs
                    .iter()
                    .map(|(kind, target)| match kind {
                        0 => set_field_value(),
                        1 => insert_record(&app(*target)),
                        2 => invoke_task(&format!("task-{}", target)),
                        3 => send_email(),
                        _ => save_to_file(),
                    })
                    .collect();
                let owner = owner.map(app);
                task(&format!("task-{}", i), owner.as_deref(), outputs)
            })
            .collect();

        let workflows = if self.tasks.is_empty() {
            vec![]
        } else {
            vec![workflow("wf-0", &app(0), &["task-0"])]
        };

        EntitySnapshot {
            workspaces,
            applications,
            dashboards,
            reports,
            tasks,
            workflows,
            flattened_layouts: Default::default(),
        }
    }
}

fn bundle_shape() -> impl Strategy<Value = BundleShape> {
    (
        1..6usize,
        vec(vec(0..8usize, 0..4), 0..3),
        vec((0..8usize, 0..8usize), 0..6),
        vec((vec(0..4usize, 0..3), vec((0..3u8, 0..6usize), 0..5)), 0..4),
        vec(vec(0..8usize, 0..3), 0..5),
        vec(
            (
                proptest::option::of(0..8usize),
                vec((0..5u8, 0..10usize), 0..3),
            ),
            0..10,
        ),
    )
        .prop_map(
            |(app_count, workspaces, references, dashboards, reports, tasks)| BundleShape {
                app_count,
                workspaces,
                references,
                dashboards,
                reports,
                tasks,
            },
        )
}

fn collapsible_ids(store: &NodeStore) -> Vec<String> {
    store
        .iter()
        .filter(|node| node.collapsible)
        .map(|node| node.id.clone())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_no_node_parents_itself(shape in bundle_shape()) {
        let store = build(&shape.to_snapshot());

        for node in store.iter() {
            prop_assert!(!node.has_parent(&node.id), "{} parents itself", node.id);
            let mut unique = node.parent_ids.clone();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(unique.len(), node.parent_ids.len());
        }

        let graph = GraphAssembler::new(&store).assemble();
        for edge in &graph.edges {
            prop_assert_ne!(&edge.source, &edge.target);
        }
    }

    #[test]
    fn prop_only_root_has_no_parents(shape in bundle_shape()) {
        let store = build(&shape.to_snapshot());

        for node in store.iter() {
            if node.kind() != NodeKind::Root {
                prop_assert!(!node.parent_ids.is_empty(), "{} has no parent", node.id);
            }
        }
    }

    #[test]
    fn prop_build_is_idempotent(shape in bundle_shape()) {
        let snapshot = shape.to_snapshot();
        let first = build(&snapshot);
        let second = build(&snapshot);

        let first_ids: Vec<&str> = first.ids().collect();
        let second_ids: Vec<&str> = second.ids().collect();
        prop_assert_eq!(&first_ids, &second_ids);

        for id in first_ids {
            let mut a = parents(&first, id);
            let mut b = parents(&second, id);
            a.sort();
            b.sort();
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn prop_edges_connect_visible_nodes(
        shape in bundle_shape(),
        toggles in vec(any::<Index>(), 0..6),
    ) {
        let mut store = build(&shape.to_snapshot());
        let candidates = collapsible_ids(&store);
        let mut controller = CollapseController::new(&mut store);
        if !candidates.is_empty() {
            for index in &toggles {
                controller.toggle(index.get(&candidates).as_str()).unwrap();
            }
        }

        let graph = controller.assemble();
        let store = controller.store();
        let mut resolver = VisibilityResolver::new(store);
        for edge in &graph.edges {
            prop_assert!(resolver.is_visible(&edge.source));
            prop_assert!(resolver.is_visible(&edge.target));
            prop_assert!(store.get(&edge.source).is_some_and(|n| n.expanded));
            prop_assert!(graph.contains_node(&edge.source));
            prop_assert!(graph.contains_node(&edge.target));
        }
        for node in &graph.nodes {
            prop_assert!(resolver.is_visible(&node.id));
        }
    }

    #[test]
    fn prop_toggle_twice_is_identity(
        shape in bundle_shape(),
        setup in vec(any::<Index>(), 0..5),
        target in any::<Index>(),
    ) {
        let mut store = build(&shape.to_snapshot());
        let candidates = collapsible_ids(&store);
        prop_assume!(!candidates.is_empty());

        let mut controller = CollapseController::new(&mut store);
        for index in &setup {
            controller.toggle(index.get(&candidates).as_str()).unwrap();
        }

        let before = controller.assemble();
        let id = target.get(&candidates).as_str();
        controller.toggle(id).unwrap();
        let after = controller.toggle(id).unwrap();

        prop_assert_eq!(node_ids(&before), node_ids(&after));
        prop_assert_eq!(edge_set(&before), edge_set(&after));
    }

    #[test]
    fn prop_rebuild_keeps_visible_graph(
        shape in bundle_shape(),
        toggles in vec(any::<Index>(), 0..6),
    ) {
        let snapshot = shape.to_snapshot();
        let mut store = build(&snapshot);
        let candidates = collapsible_ids(&store);
        if !candidates.is_empty() {
            let mut controller = CollapseController::new(&mut store);
            for index in &toggles {
                controller.toggle(index.get(&candidates).as_str()).unwrap();
            }
        }

        let rebuilt = NodeGraphBuilder::new(&snapshot).with_previous(&store).build();

        prop_assert_eq!(
            GraphAssembler::new(&rebuilt).assemble(),
            GraphAssembler::new(&store).assemble()
        );
    }
}
