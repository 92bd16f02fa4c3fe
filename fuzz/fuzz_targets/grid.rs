#![no_main]
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;
use practiceplan_libs::{build_grid, Day, TimeWindow};

fuzz_target!(|data: (Vec<Day>, u16, u16, u8)| {
    let (days, start, end, resolution) = data;
    let resolution = u16::from(resolution);

    if let Ok(grid) = build_grid(&days, start, end, resolution) {
        let window = TimeWindow::new(start, end);
        let unique_days = days.iter().collect::<HashSet<_>>();

        assert_eq!(
            grid.len(),
            unique_days.len() * ((end - start + resolution - 1) / resolution) as usize,
            "Every requested day should hold the same number of slots"
        );
        assert!(
            grid.iter().all(|slot| window.contains(slot.minute)),
            "Slot outside of the requested window"
        );
        assert_eq!(
            grid.iter().collect::<HashSet<_>>().len(),
            grid.len(),
            "Duplicate slot in grid"
        );
    }
});
