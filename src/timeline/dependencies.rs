//! Dependency edges and the connector geometry drawn between bars.
//!
//! Activities store only their prerequisites. Edges are derived per frame;
//! ids that no longer resolve are skipped without complaint.

use std::collections::{HashMap, HashSet};

use egui::{Pos2, Vec2};
use uuid::Uuid;

use super::layout::TimelineLayout;
use crate::model::Activity;

const ARROW_HEAD_LENGTH: f32 = 6.0;
const ARROW_HEAD_HALF_WIDTH: f32 = 4.0;
const MIN_CURVE_REACH: f32 = 24.0;

/// Directed edge from a prerequisite to the activity that depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DependencyEdge {
    pub from: Uuid,
    pub to: Uuid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DependencyArrow {
    pub edge: DependencyEdge,
    /// Cubic Bézier from the prerequisite's right edge to the dependent's left edge.
    pub curve: [Pos2; 4],
    /// Arrow head at the dependent end: tip, then the two base corners.
    pub head: [Pos2; 3],
}

/// Every resolvable prerequisite → dependent edge, in activity order.
///
/// Unknown ids, self references and repeated ids are dropped.
pub fn dependency_edges(activities: &[Activity]) -> Vec<DependencyEdge> {
    let known: HashSet<Uuid> = activities.iter().map(|a| a.id).collect();
    let mut seen = HashSet::new();
    activities
        .iter()
        .flat_map(|a| a.dependencies.iter().map(move |dep| DependencyEdge { from: *dep, to: a.id }))
        .filter(|e| e.from != e.to && known.contains(&e.from))
        .filter(|e| seen.insert(*e))
        .collect()
}

/// Activities that list `id` as a prerequisite.
pub fn dependents_of(id: Uuid, activities: &[Activity]) -> Vec<Uuid> {
    activities
        .iter()
        .filter(|a| a.id != id && a.dependencies.contains(&id))
        .map(|a| a.id)
        .collect()
}

/// One dependency cycle, if any exists, as the ids along it.
///
/// Cycles are legal and render fine; this is for reporting only.
pub fn find_cycle(activities: &[Activity]) -> Option<Vec<Uuid>> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Visiting,
        Done,
    }

    let mut prerequisites: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for edge in dependency_edges(activities) {
        prerequisites.entry(edge.to).or_default().push(edge.from);
    }

    let mut marks: HashMap<Uuid, Mark> = HashMap::new();
    for root in activities.iter().map(|a| a.id) {
        if marks.contains_key(&root) {
            continue;
        }
        // Iterative DFS: (node, next prerequisite index), plus the current path.
        let mut stack: Vec<(Uuid, usize)> = vec![(root, 0)];
        let mut path: Vec<Uuid> = vec![root];
        marks.insert(root, Mark::Visiting);

        while let Some((node, next)) = stack.last().copied() {
            let deps = prerequisites.get(&node).map(Vec::as_slice).unwrap_or(&[]);
            if next < deps.len() {
                if let Some(top) = stack.last_mut() {
                    top.1 += 1;
                }
                let dep = deps[next];
                match marks.get(&dep) {
                    Some(Mark::Visiting) => {
                        let start = path.iter().position(|id| *id == dep).unwrap_or(0);
                        return Some(path[start..].to_vec());
                    }
                    Some(Mark::Done) => {}
                    None => {
                        marks.insert(dep, Mark::Visiting);
                        stack.push((dep, 0));
                        path.push(dep);
                    }
                }
            } else {
                marks.insert(node, Mark::Done);
                stack.pop();
                path.pop();
            }
        }
    }
    None
}

/// Connector geometry for every edge whose two bars are on screen.
pub fn dependency_arrows(activities: &[Activity], layout: &TimelineLayout) -> Vec<DependencyArrow> {
    dependency_edges(activities)
        .into_iter()
        .filter_map(|edge| {
            let from = layout.bar(edge.from)?;
            let to = layout.bar(edge.to)?;
            Some(connector(edge, from.rect.right_center(), to.rect.left_center()))
        })
        .collect()
}

fn connector(edge: DependencyEdge, start: Pos2, end: Pos2) -> DependencyArrow {
    let reach = ((end.x - start.x).abs() / 2.0).max(MIN_CURVE_REACH);
    let curve = [
        start,
        start + Vec2::new(reach, 0.0),
        end - Vec2::new(reach, 0.0),
        end,
    ];
    let head = [
        end,
        Pos2::new(end.x - ARROW_HEAD_LENGTH, end.y - ARROW_HEAD_HALF_WIDTH),
        Pos2::new(end.x - ARROW_HEAD_LENGTH, end.y + ARROW_HEAD_HALF_WIDTH),
    ];
    DependencyArrow { edge, curve, head }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Swimlane;
    use crate::settings::LayoutMetrics;
    use crate::timeline::coords::TimelineViewport;
    use crate::timeline::lanes::SwimlaneManager;
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn activity(title: &str, lane: Uuid) -> Activity {
        Activity::new(title, date(1, 1), date(1, 3), lane)
    }

    #[test]
    fn unknown_prerequisite_yields_no_edge() {
        let lane = Uuid::new_v4();
        let a = activity("A", lane).with_dependency(Uuid::new_v4());
        assert!(dependency_edges(&[a]).is_empty());
    }

    #[test]
    fn edges_point_from_prerequisite_to_dependent() {
        let lane = Uuid::new_v4();
        let brief = activity("Brief", lane);
        let copy = activity("Copy", lane).with_dependency(brief.id).with_dependency(brief.id);
        let edges = dependency_edges(&[brief.clone(), copy.clone()]);
        assert_eq!(edges, vec![DependencyEdge { from: brief.id, to: copy.id }]);
        assert_eq!(dependents_of(brief.id, &[brief, copy.clone()]), vec![copy.id]);
    }

    #[test]
    fn self_reference_is_ignored() {
        let lane = Uuid::new_v4();
        let mut a = activity("A", lane);
        a.dependencies.push(a.id);
        assert!(dependency_edges(&[a]).is_empty());
    }

    #[test]
    fn cycles_are_found_but_still_render() {
        let lane = Swimlane::new("Email");
        let mut a = activity("A", lane.id);
        let mut b = activity("B", lane.id);
        let c = activity("C", lane.id);
        a.dependencies.push(b.id);
        b.dependencies.push(a.id);
        let activities = vec![a.clone(), b.clone(), c];

        let cycle = find_cycle(&activities).unwrap();
        assert_eq!(cycle.len(), 2);
        assert!(cycle.contains(&a.id) && cycle.contains(&b.id));

        let manager = SwimlaneManager::new(&[lane]);
        let viewport = TimelineViewport::new(date(1, 1), date(2, 1));
        let layout =
            TimelineLayout::compute(&activities, &manager, &viewport, LayoutMetrics::default());
        assert_eq!(dependency_arrows(&activities, &layout).len(), 2);
    }

    #[test]
    fn acyclic_chain_has_no_cycle() {
        let lane = Uuid::new_v4();
        let a = activity("A", lane);
        let b = activity("B", lane).with_dependency(a.id);
        let c = activity("C", lane).with_dependency(b.id).with_dependency(a.id);
        assert!(find_cycle(&[a, b, c]).is_none());
    }

    #[test]
    fn arrow_runs_from_right_edge_to_left_edge() {
        let lane = Swimlane::new("Social");
        let first = Activity::new("Teaser", date(1, 1), date(1, 2), lane.id);
        let second = Activity::new("Launch", date(1, 10), date(1, 12), lane.id).with_dependency(first.id);
        let activities = vec![first.clone(), second.clone()];
        let manager = SwimlaneManager::new(&[lane]);
        let viewport = TimelineViewport::new(date(1, 1), date(2, 1));
        let layout =
            TimelineLayout::compute(&activities, &manager, &viewport, LayoutMetrics::default());

        let arrows = dependency_arrows(&activities, &layout);
        assert_eq!(arrows.len(), 1);
        let arrow = &arrows[0];
        assert_eq!(arrow.curve[0], layout.bar(first.id).unwrap().rect.right_center());
        assert_eq!(arrow.curve[3], layout.bar(second.id).unwrap().rect.left_center());
        assert_eq!(arrow.head[0], arrow.curve[3]);
    }
}
