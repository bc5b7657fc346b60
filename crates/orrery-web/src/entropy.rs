/// 64 bits of per-session entropy from the host.
///
/// In the browser this mixes `Math.random()` with the wall clock. Native
/// builds (tests, tools) use the system clock alone.
#[cfg(target_arch = "wasm32")]
pub fn host_entropy() -> u64 {
    let random = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
    let now = js_sys::Date::now() as u64;
    mix(random, now)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn host_entropy() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    mix(nanos, std::process::id() as u64)
}

fn mix(a: u64, b: u64) -> u64 {
    a ^ b.rotate_left(29).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
