//! Property invariants for the solver, pagination, and drag session.
//!
//! Random inputs across wide ranges; every derived layout must hold the
//! partition, aspect, and fit guarantees, and repeated calls must agree.

use std::cell::Cell;
use std::num::NonZeroUsize;
use std::rc::Rc;

use proptest::prelude::*;
use zengrid::{
    Extent, GridConfig, GridInputs, MinSizePolicy, Point, PointerCapture, PointerEvent,
    PointerTarget, ResizeSession, TileConstraints, derive, paginate, solve, solve_capped,
};

fn constraints(ratio: f64, gap: f64) -> TileConstraints {
    TileConstraints::new(ratio, 160.0, 90.0).gap(gap)
}

struct Live(Rc<Cell<isize>>);

impl Drop for Live {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

#[derive(Clone, Default)]
struct Counter(Rc<Cell<isize>>);

impl PointerCapture for Counter {
    type Guard = Live;

    fn capture(&mut self) -> Live {
        self.0.set(self.0.get() + 1);
        Live(Rc::clone(&self.0))
    }
}

fn point() -> impl Strategy<Value = Point> {
    (-2000.0f64..2000.0, -2000.0f64..2000.0).prop_map(|(x, y)| Point::new(x, y))
}

fn pointer_event() -> impl Strategy<Value = PointerEvent> {
    let id = || 1u32..=3;
    prop_oneof![
        (id(), point(), any::<bool>()).prop_map(|(pointer_id, position, on_handle)| {
            PointerEvent::Down {
                pointer_id,
                position,
                target: if on_handle {
                    PointerTarget::ResizeHandle
                } else {
                    PointerTarget::Elsewhere
                },
            }
        }),
        (id(), point())
            .prop_map(|(pointer_id, position)| PointerEvent::Move { pointer_id, position }),
        (id(), point()).prop_map(|(pointer_id, position)| PointerEvent::Up { pointer_id, position }),
        id().prop_map(|pointer_id| PointerEvent::Cancel { pointer_id }),
    ]
}

proptest! {
    #[test]
    fn partition_covers_every_tile(
        n in 1usize..200,
        w in 0.0f64..4000.0,
        h in 0.0f64..4000.0,
        gap in 0.0f64..32.0,
    ) {
        let l = solve(n, Extent::new(w, h), &constraints(16.0 / 9.0, gap));
        prop_assert!(l.rows >= 1 && l.cols >= 1);
        prop_assert!(l.rows * l.cols >= n);
        prop_assert!(l.occupied_rows(n) >= 1 && l.occupied_rows(n) <= l.rows);
    }

    #[test]
    fn tiles_keep_aspect_and_fit(
        n in 1usize..120,
        w in 0.0f64..4000.0,
        h in 0.0f64..4000.0,
        gap in 0.0f64..32.0,
        ratio in 0.25f64..4.0,
    ) {
        let l = solve(n, Extent::new(w, h), &constraints(ratio, gap));
        prop_assert!(l.tile_width >= 0.0 && l.tile_height >= 0.0);
        if l.tile_height > 0.0 {
            prop_assert!((l.tile_width / l.tile_height - ratio).abs() < 1e-6);
            let used_w = l.cols as f64 * l.tile_width + (l.cols - 1) as f64 * gap;
            let used_h = l.rows as f64 * l.tile_height + (l.rows - 1) as f64 * gap;
            prop_assert!(used_w <= w + 1e-6, "{l:?} overflows width {w}");
            prop_assert!(used_h <= h + 1e-6, "{l:?} overflows height {h}");
        }
    }

    #[test]
    fn full_search_never_loses_to_a_capped_one(
        n in 2usize..60,
        w in 100.0f64..3000.0,
        h in 100.0f64..3000.0,
        cap in 1usize..60,
    ) {
        let c = constraints(16.0 / 9.0, 8.0);
        let container = Extent::new(w, h);
        let free = solve(n, container, &c);
        let capped = solve_capped(n, container, &c, Some(cap));
        prop_assert!(free.tile_area() >= capped.tile_area());
        prop_assert!(capped.rows <= cap.max(1));
    }

    #[test]
    fn solve_is_deterministic(
        n in 0usize..100,
        w in -100.0f64..3000.0,
        h in -100.0f64..3000.0,
        strict in any::<bool>(),
    ) {
        let policy = if strict { MinSizePolicy::Strict } else { MinSizePolicy::BestEffort };
        let c = constraints(16.0 / 9.0, 8.0).policy(policy);
        let container = Extent::new(w, h);
        prop_assert_eq!(solve(n, container, &c), solve(n, container, &c));
    }

    #[test]
    fn pages_partition_the_total(total in 0usize..500, cap in 1usize..40) {
        let cap = NonZeroUsize::new(cap).unwrap();
        let first = paginate(total, cap, 1);
        let mut sum = 0;
        let mut expected_offset = 0;
        for index in 1..=first.total_pages {
            let page = paginate(total, cap, index);
            prop_assert_eq!(page.index, index);
            prop_assert_eq!(page.start_offset, expected_offset);
            prop_assert!(page.visible_count <= cap.get());
            sum += page.visible_count;
            expected_offset += cap.get();
        }
        prop_assert_eq!(sum, total);
    }

    #[test]
    fn page_requests_always_clamp_into_range(
        total in 0usize..500,
        cap in 1usize..40,
        requested in 0usize..1000,
    ) {
        let page = paginate(total, NonZeroUsize::new(cap).unwrap(), requested);
        prop_assert!(page.index >= 1 && page.index <= page.total_pages);
        prop_assert!(page.start_offset + page.visible_count <= total);
    }

    #[test]
    fn derive_agrees_with_solving_the_visible_page(
        participants in 0usize..200,
        w in 160.0f64..3000.0,
        h in 90.0f64..2000.0,
        cap in 1usize..30,
        page in 0usize..20,
    ) {
        let config = GridConfig::default().page_capacity(cap);
        let container = Extent::new(w, h);
        let plan = derive(&config, &GridInputs { participants, container, page });
        let direct = solve(plan.page.visible_count, container, &config.constraints);
        prop_assert_eq!(plan.layout, direct);
        prop_assert_eq!(plan.tiles().count(), plan.page.visible_count);
    }

    #[test]
    fn drag_never_leaks_capture(events in prop::collection::vec(pointer_event(), 0..64)) {
        let counter = Counter::default();
        let floor = Extent::new(160.0, 90.0);
        {
            let mut session = ResizeSession::new(counter.clone(), floor);
            let container = Extent::new(800.0, 600.0);
            for event in events {
                session.handle(event, container);
                let live = counter.0.get();
                prop_assert_eq!(live, isize::from(session.is_active()));
            }
        }
        prop_assert_eq!(counter.0.get(), 0);
    }
}
