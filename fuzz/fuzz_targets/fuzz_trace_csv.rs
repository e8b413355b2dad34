#![no_main]
use libfuzzer_sys::fuzz_target;
use robodata_core::{HeadingCfg, Trace, VelocityCfg, derive};

fuzz_target!(|data: &[u8]| {
    let Ok(rows) = robodata_config::read_trace_csv(data, "fuzz") else {
        return;
    };
    // Arbitrary timestamps must surface as DatasetError, never a panic.
    let trace = Trace::from_rows(&rows);
    let _ = derive(&trace, &VelocityCfg::default(), &HeadingCfg::default());
});
