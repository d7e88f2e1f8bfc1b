//! Ports - 外部コラボレーターとの境界

pub mod reload;

pub use self::reload::Reloader;
