pub mod busy;
pub mod day;
pub mod error;
pub mod grid;
pub mod optimize;
pub mod rank;
pub mod roster;
pub mod slot;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use busy::BusyCounts;
pub use day::{Day, WEEK};
pub use error::ValidationError;
pub use grid::{build_grid, TimeWindow};
pub use optimize::{optimize, AvailabilitySource, OptimizeRequest, OptimizeResponse, Snapshot};
pub use rank::{order_results, rank, ByDay, Ranking, SlotResult};
pub use roster::Roster;
pub use slot::{Slot, SLOT_MINUTES};

#[cfg(test)]
mod tests {
    use crate::busy::BusyCounts;
    use crate::day::{Day, WEEK};
    use crate::error::ValidationError;
    use crate::grid::build_grid;
    use crate::rank::{order_results, rank, SlotResult};
    use crate::slot::Slot;

    fn busy(entries: &[(Day, u16, usize)]) -> BusyCounts {
        entries
            .iter()
            .map(|&(day, minute, count)| (Slot::new(day, minute), count))
            .collect()
    }

    #[test]
    fn builds_half_open_grid() {
        assert_eq!(
            build_grid(&[Day::Mon], 1080, 1140, 30),
            Ok(vec![Slot::new(Day::Mon, 1080), Slot::new(Day::Mon, 1110)])
        );

        assert_eq!(
            build_grid(&[Day::Sun, Day::Wed], 0, 61, 30),
            Ok(vec![
                Slot::new(Day::Sun, 0),
                Slot::new(Day::Sun, 30),
                Slot::new(Day::Sun, 60),
                Slot::new(Day::Wed, 0),
                Slot::new(Day::Wed, 30),
                Slot::new(Day::Wed, 60),
            ])
        );

        assert_eq!(build_grid(&WEEK, 0, 1440, 30).map(|g| g.len()), Ok(336));
    }

    #[test]
    fn rejects_bad_grids() {
        assert_eq!(
            build_grid(&[Day::Mon], 600, 600, 30),
            Err(ValidationError::InvalidRange {
                start: 600,
                end: 600
            })
        );
        assert_eq!(
            build_grid(&[Day::Mon], 600, 1470, 30),
            Err(ValidationError::InvalidRange {
                start: 600,
                end: 1470
            })
        );
        assert_eq!(
            build_grid(&[Day::Mon], 615, 700, 30),
            Err(ValidationError::MisalignedRange {
                value: 615,
                resolution: 30
            })
        );
        assert_eq!(
            build_grid(&[Day::Mon], 600, 700, 0),
            Err(ValidationError::InvalidResolution)
        );
        assert_eq!(build_grid(&[], 600, 700, 30), Err(ValidationError::EmptyDays));
    }

    #[test]
    fn computes_percentages() {
        let grid = vec![Slot::new(Day::Mon, 600)];

        let ranking = rank(&grid, &busy(&[(Day::Mon, 600, 1)]), 4, &WEEK).unwrap();
        assert_eq!(ranking.by_percentage[0].available_count, 3);
        assert_eq!(ranking.by_percentage[0].percentage, 75.0);

        let grid = vec![Slot::new(Day::Mon, 600), Slot::new(Day::Mon, 630)];
        let ranking = rank(&grid, &busy(&[(Day::Mon, 630, 3)]), 3, &WEEK).unwrap();
        assert_eq!(ranking.by_percentage[0].percentage, 100.0);
        assert_eq!(ranking.by_percentage[1].percentage, 0.0);
        assert_eq!(ranking.by_percentage[1].available_count, 0);
    }

    #[test]
    fn rounds_half_up_to_two_decimals() {
        let slot = Slot::new(Day::Fri, 900);
        let percentage = |busy, total| SlotResult::new(slot, busy, total).unwrap().percentage;

        assert_eq!(percentage(1, 3), 66.67);
        assert_eq!(percentage(2, 3), 33.33);
        assert_eq!(percentage(7, 8), 12.5);
        assert_eq!(percentage(15, 16), 6.25);
        // 1/32 = 3.125% rounds up
        assert_eq!(percentage(31, 32), 3.13);
        assert_eq!(SlotResult::new(slot, 31, 32).unwrap().hundredths(), 313);
    }

    #[test]
    fn slot_results_reject_bad_totals() {
        let slot = Slot::new(Day::Mon, 600);

        assert_eq!(
            SlotResult::new(slot, 0, 0),
            Err(ValidationError::NoParticipants)
        );
        assert_eq!(
            SlotResult::new(slot, 5, 2),
            Err(ValidationError::DataConsistency {
                day: Day::Mon,
                slot_min: 600,
                busy: 5,
                total: 2,
            })
        );
        assert_eq!(
            SlotResult::new(slot, 2, 2).map(|r| (r.available_count, r.percentage)),
            Ok((0, 0.0))
        );
    }

    #[test]
    fn ranks_with_four_level_tie_break() {
        let grid = build_grid(&[Day::Sun, Day::Tue, Day::Mon], 600, 690, 30).unwrap();
        let busy = busy(&[
            (Day::Mon, 600, 1),
            (Day::Tue, 630, 2),
            (Day::Sun, 660, 1),
        ]);

        let ranking = rank(&grid, &busy, 4, &WEEK).unwrap();

        assert_eq!(
            ranking
                .by_percentage
                .iter()
                .map(|r| r.label.as_str())
                .collect::<Vec<_>>(),
            vec![
                "Mon 10:30 AM",
                "Mon 11:00 AM",
                "Tue 10:00 AM",
                "Tue 11:00 AM",
                "Sun 10:00 AM",
                "Sun 10:30 AM",
                "Mon 10:00 AM",
                "Sun 11:00 AM",
                "Tue 10:30 AM",
            ]
        );
    }

    #[test]
    fn prefers_larger_available_count_on_equal_percentage() {
        let two_of_four = SlotResult::new(Slot::new(Day::Mon, 600), 2, 4).unwrap();
        let three_of_six = SlotResult::new(Slot::new(Day::Sun, 1200), 3, 6).unwrap();
        assert_eq!(two_of_four.percentage, three_of_six.percentage);

        let ranking = order_results(vec![two_of_four, three_of_six.clone()], &WEEK).unwrap();

        assert_eq!(ranking.by_percentage[0], three_of_six);
    }

    #[test]
    fn per_day_ranking_ignores_available_count() {
        let two_of_four = SlotResult::new(Slot::new(Day::Mon, 600), 2, 4).unwrap();
        let three_of_six = SlotResult::new(Slot::new(Day::Mon, 630), 3, 6).unwrap();

        let ranking = order_results(vec![two_of_four, three_of_six], &WEEK).unwrap();

        assert_eq!(
            ranking
                .by_percentage
                .iter()
                .map(|r| r.slot.minute)
                .collect::<Vec<_>>(),
            vec![630, 600]
        );
        assert_eq!(
            ranking
                .by_day
                .get(Day::Mon)
                .unwrap()
                .iter()
                .map(|r| r.slot.minute)
                .collect::<Vec<_>>(),
            vec![600, 630]
        );
    }

    #[test]
    fn groups_by_canonical_day() {
        let grid = build_grid(&[Day::Fri, Day::Mon], 1080, 1170, 30).unwrap();
        let busy = busy(&[(Day::Fri, 1080, 2), (Day::Fri, 1140, 1)]);

        let ranking = rank(&grid, &busy, 2, &WEEK).unwrap();

        assert_eq!(ranking.by_day.days().collect::<Vec<_>>(), WEEK.to_vec());
        assert!(ranking.by_day.get(Day::Tue).unwrap().is_empty());
        assert_eq!(
            ranking
                .by_day
                .get(Day::Fri)
                .unwrap()
                .iter()
                .map(|r| r.slot.minute)
                .collect::<Vec<_>>(),
            vec![1110, 1140, 1080]
        );
        assert_eq!(
            ranking
                .by_day
                .get(Day::Mon)
                .unwrap()
                .iter()
                .map(|r| r.slot.minute)
                .collect::<Vec<_>>(),
            vec![1080, 1110, 1140]
        );
    }

    #[test]
    fn by_day_partitions_global_ranking() {
        let grid = build_grid(&WEEK, 360, 1320, 30).unwrap();
        let busy: BusyCounts = grid
            .iter()
            .enumerate()
            .map(|(i, &slot)| (slot, i % 6))
            .collect();

        let ranking = rank(&grid, &busy, 5, &WEEK).unwrap();
        assert_eq!(ranking.by_percentage.len(), grid.len());

        let mut from_days = ranking
            .by_day
            .iter()
            .flat_map(|(_, results)| results.iter().map(|r| r.slot))
            .collect::<Vec<_>>();
        let mut global = ranking.by_percentage.iter().map(|r| r.slot).collect::<Vec<_>>();
        from_days.sort();
        global.sort();

        let mut expected = grid.clone();
        expected.sort();
        assert_eq!(global, expected);
        assert_eq!(from_days, expected);

        assert!(ranking
            .by_percentage
            .iter()
            .all(|r| r.available_count <= 5 && r.percentage >= 0.0 && r.percentage <= 100.0));
    }

    #[test]
    fn ranking_is_idempotent() {
        let grid = build_grid(&[Day::Thu, Day::Sat], 360, 1320, 30).unwrap();
        let busy: BusyCounts = grid
            .iter()
            .enumerate()
            .map(|(i, &slot)| (slot, (i * 7) % 4))
            .collect();

        assert_eq!(
            rank(&grid, &busy, 3, &WEEK),
            rank(&grid, &busy, 3, &WEEK)
        );
    }

    #[test]
    fn fails_fast_on_bad_totals() {
        let grid = vec![Slot::new(Day::Mon, 600)];

        assert_eq!(
            rank(&grid, &BusyCounts::new(), 0, &WEEK),
            Err(ValidationError::NoParticipants)
        );
        assert_eq!(
            rank(&grid, &busy(&[(Day::Mon, 600, 3)]), 2, &WEEK),
            Err(ValidationError::DataConsistency {
                day: Day::Mon,
                slot_min: 600,
                busy: 3,
                total: 2,
            })
        );
        assert_eq!(
            rank(&grid, &BusyCounts::new(), 2, &[Day::Tue]),
            Err(ValidationError::DayNotInOrder(Day::Mon))
        );
    }

    #[test]
    fn optimizes_against_roster() {
        use crate::optimize::{optimize, OptimizeRequest};
        use crate::roster::Roster;

        let mut roster = Roster::new();
        assert_eq!(
            optimize(&OptimizeRequest::default(), &roster),
            Err(ValidationError::NoParticipants)
        );

        let ada = roster.add_participant("Ada").unwrap();
        let bo = roster.add_participant("Bo").unwrap();
        roster.add_participant("Cy").unwrap();
        roster.mark_unavailable(ada, Day::Mon, 0, 1440).unwrap();
        roster.mark_unavailable(bo, Day::Mon, 1080, 1140).unwrap();

        let request = OptimizeRequest {
            start_min: Some(1080),
            end_min: Some(1200),
            days: Some(vec![Day::Mon]),
        };
        let response = optimize(&request, &roster).unwrap();

        assert_eq!(response.total_athletes, 3);
        assert_eq!(
            response
                .results_by_percent
                .iter()
                .map(|r| (r.label.as_str(), r.available_count, r.percentage))
                .collect::<Vec<_>>(),
            vec![
                ("Mon 7:00 PM", 2, 66.67),
                ("Mon 7:30 PM", 2, 66.67),
                ("Mon 6:00 PM", 1, 33.33),
                ("Mon 6:30 PM", 1, 33.33),
            ]
        );

        let reversed = OptimizeRequest {
            start_min: Some(1200),
            end_min: Some(1080),
            days: None,
        };
        assert_eq!(
            optimize(&reversed, &roster),
            Err(ValidationError::InvalidRange {
                start: 1200,
                end: 1080
            })
        );
    }

    #[test]
    fn defaults_requests_to_whole_week() {
        use crate::grid::TimeWindow;
        use crate::optimize::OptimizeRequest;

        let request = OptimizeRequest {
            days: Some(vec![]),
            ..OptimizeRequest::default()
        };

        assert_eq!(request.days(), WEEK.to_vec());
        assert_eq!(request.window(), TimeWindow::new(360, 1320));
    }
}
