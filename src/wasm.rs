use crate::busy::BusyCounts;
use crate::day::Day;
use crate::optimize::{optimize, OptimizeRequest, Snapshot};
use crate::slot::Slot;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct BusyRow {
    day: Day,
    slot_min: u16,
    count: usize,
}

#[derive(Deserialize)]
struct RankInput {
    #[serde(flatten)]
    request: OptimizeRequest,
    participant_total: usize,
    #[serde(default)]
    busy: Vec<BusyRow>,
}

/// Ranks slots for the web front end. Takes the optimize request fields plus
/// `participant_total` and the aggregated `busy` rows `{day, slot_min, count}`.
#[wasm_bindgen(js_name = optimize)]
pub fn optimize_js(input: JsValue) -> Result<JsValue, JsValue> {
    let input: RankInput = serde_wasm_bindgen::from_value(input)?;

    let snapshot = Snapshot {
        total: input.participant_total,
        busy: input
            .busy
            .into_iter()
            .map(|row| (Slot::new(row.day, row.slot_min), row.count))
            .collect::<BusyCounts>(),
    };

    let response = optimize(&input.request, &snapshot)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(response.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}
