//! Wall-clock time for saved-game stamps.

use yazboz_core::SavedAt;

/// The current local time, as stamped on a saved game.
#[must_use]
pub fn now() -> SavedAt {
    #[cfg(target_arch = "wasm32")]
    {
        browser_now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        SavedAt::from_datetime(&chrono::Local::now())
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_now() -> SavedAt {
    use chrono::{FixedOffset, TimeZone, Utc};

    let date = js_sys::Date::new_0();
    #[allow(clippy::cast_possible_truncation)]
    let millis = date.get_time() as i64;
    // getTimezoneOffset is minutes *behind* UTC
    #[allow(clippy::cast_possible_truncation)]
    let offset_secs = -(date.get_timezone_offset() as i32) * 60;
    FixedOffset::east_opt(offset_secs)
        .and_then(|offset| {
            Utc.timestamp_millis_opt(millis)
                .single()
                .map(|utc| utc.with_timezone(&offset))
        })
        .map_or_else(
            || SavedAt {
                millis,
                date: String::new(),
                time: String::new(),
            },
            |local| SavedAt::from_datetime(&local),
        )
}
