// Diagnostic stopwatch. std::time::Instant is unavailable on
// wasm32-unknown-unknown, so the browser clock is used there.

#[cfg(not(target_arch = "wasm32"))]
pub struct Stopwatch {
    start: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl Stopwatch {
    pub fn start() -> Stopwatch {
        Stopwatch { start: std::time::Instant::now() }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

#[cfg(target_arch = "wasm32")]
pub struct Stopwatch {
    start: f64,
}

#[cfg(target_arch = "wasm32")]
impl Stopwatch {
    pub fn start() -> Stopwatch {
        Stopwatch { start: js_sys::Date::now() }
    }

    pub fn elapsed_ms(&self) -> u64 {
        (js_sys::Date::now() - self.start).max(0.0) as u64
    }
}
