pub mod hash;
pub mod rng;

// Optional: Re-export key functions if desired for easier access via crate::utils::...
// pub use hash::new_default_hasher;
// pub use rng::thread_rng;
