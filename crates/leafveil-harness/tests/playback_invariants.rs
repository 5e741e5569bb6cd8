#![forbid(unsafe_code)]

//! Whole-run invariants, observed through fixed-step playback.
//!
//! Run with: cargo test -p leafveil-harness --test playback_invariants

use leafveil_field::FlickerField;
use leafveil_harness::determinism::DeterminismFixture;
use leafveil_harness::playback::Playback;
use leafveil_harness::snapshot::ascii_frame;

fn seeded_field(seed: u64) -> FlickerField {
    FlickerField::seeded(40, 30, 20.0, 15.0, seed)
}

#[test]
fn counters_are_monotone_over_a_run() {
    let fixture = DeterminismFixture::new(0xD15501);
    let mut playback = Playback::new(seeded_field(fixture.seed()), 50.0);
    let records = playback.run_to_completion(10_000);
    assert!(records.last().is_some_and(|r| r.complete));

    for pair in records.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(
            b.active_cells <= a.active_cells,
            "active cells rose {} -> {} at {} ms",
            a.active_cells,
            b.active_cells,
            b.elapsed_ms
        );
        assert!(
            b.settled_cells >= a.settled_cells,
            "settled cells fell {} -> {} at {} ms",
            a.settled_cells,
            b.settled_cells,
            b.elapsed_ms
        );
        assert!(b.progress >= a.progress);
        assert!(b.elapsed_ms > a.elapsed_ms);
    }
}

#[test]
fn run_ends_with_only_the_border_active() {
    let mut playback = Playback::new(seeded_field(7), 50.0);
    // One full fade past the cutoff, so the last lazily observed transition
    // has finished fading before we inspect the grid.
    let fade = playback.field().params().fade_duration_ms;
    let end = playback.field().params().completion_ms() + fade;
    while playback.elapsed_ms() <= end {
        playback.tick();
    }

    // 40x30 grid, 10-cell border: the interior is 20x10.
    let last = playback.tick();
    let interior = 20 * 10;
    let border = 40 * 30 - interior;
    assert_eq!(last.active_cells, border, "only the frame keeps flickering");
    assert_eq!(last.settled_cells, interior, "every interior cell settled");
}

#[test]
fn identical_seeds_replay_identically() {
    let mut a = Playback::new(seeded_field(42), 100.0);
    let mut b = Playback::new(seeded_field(42), 100.0);
    let ra = a.run_to_completion(1_000);
    let rb = b.run_to_completion(1_000);
    assert_eq!(ra, rb);
}

#[test]
fn ascii_run_reveals_the_interior() {
    let mut field = seeded_field(9);
    let end = field.params().completion_ms() + field.params().fade_duration_ms;

    let opening = ascii_frame(&mut field, 0.0);
    assert!(!opening.contains(' '), "nothing revealed at t=0");

    // Coarse per-frame drive to the end of the effect.
    let mut t = 0.0;
    while t <= end {
        t += 50.0;
        field.advance(t);
    }
    let closing = ascii_frame(&mut field, t);

    for (y, line) in closing.lines().enumerate() {
        for (x, c) in line.chars().enumerate() {
            let border = field.is_border(x as u32, y as u32);
            if border {
                assert!(
                    c == '#' || c == '+',
                    "border ({x}, {y}) should flicker, got {c:?}"
                );
            } else {
                assert_eq!(c, ' ', "interior ({x}, {y}) should be revealed");
            }
        }
    }
}
