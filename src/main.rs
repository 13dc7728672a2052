use std::error::Error;

use log::{debug, info};
use shader_specialization::prelude::*;

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .parse_default_env()
        .init();

    debug!(
        "Using commit {}",
        git_version::git_version!(fallback = "unknown")
    );

    let mut sp = ShaderSpecialization::<(i32, i32, f32)>::new();
    sp.set::<0>(4);
    sp.set::<1>(1);
    sp.set::<2>(93.2);

    info!(
        "{} constants in {} bytes: ({}, {}, {})",
        ShaderSpecialization::<(i32, i32, f32)>::COUNT,
        ShaderSpecialization::<(i32, i32, f32)>::SIZE,
        sp.get::<0>(),
        sp.get::<1>(),
        sp.get::<2>()
    );
    for (entry, kind) in sp.entries().iter().zip(sp.kinds()) {
        info!(
            "constant {} ({kind}) at offset {}, {} bytes",
            entry.constant_id, entry.offset, entry.size
        );
    }

    let info = sp.info();
    debug!(
        "map_entry_count = {}, data_size = {}, data = {:02x?}",
        info.map_entry_count,
        info.data_size,
        sp.as_bytes()
    );

    let mut map = SpecializationMap::from(&sp);
    let id = map.push(1u32);
    map.set(2, 0.5f32)?;
    info!(
        "runtime map: {} constants in {} bytes, constant {id} = {}",
        map.count(),
        map.size(),
        map.get::<u32>(id as usize)?
    );

    Ok(())
}
