#![no_main]
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;
use practiceplan_libs::{build_grid, rank, BusyCounts, Slot, WEEK};

fuzz_target!(|data: (Vec<(Slot, u8)>, u8)| {
    #[cfg(feature = "log")]
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply();

    let (entries, total) = data;
    let total = usize::from(total);
    let busy = entries
        .into_iter()
        .map(|(slot, count)| (slot, usize::from(count)))
        .collect::<BusyCounts>();
    let grid = build_grid(&WEEK, 0, 1440, 30).unwrap();

    let ranking = match rank(&grid, &busy, total, &WEEK) {
        Ok(ranking) => ranking,
        Err(_) => {
            assert!(
                total == 0 || grid.iter().any(|&slot| busy.get(slot) > total),
                "Ranking failed on consistent input"
            );
            return;
        }
    };

    assert_eq!(ranking.by_percentage.len(), grid.len());
    assert!(
        ranking
            .by_percentage
            .iter()
            .all(|r| r.percentage >= 0.0 && r.percentage <= 100.0),
        "Percentage out of bounds"
    );
    assert!(
        ranking
            .by_percentage
            .iter()
            .zip(ranking.by_percentage.iter().skip(1))
            .all(|(l, r)| l.hundredths() >= r.hundredths()),
        "Global ranking is not sorted by percentage"
    );

    let global = ranking.by_percentage.iter().map(|r| r.slot).collect::<HashSet<_>>();
    let by_day = ranking
        .by_day
        .iter()
        .flat_map(|(_, results)| results.iter().map(|r| r.slot))
        .collect::<HashSet<_>>();
    assert_eq!(global, by_day, "Per-day ranking does not partition the global ranking");

    assert_eq!(Ok(ranking), rank(&grid, &busy, total, &WEEK), "Ranking is not deterministic");
});
