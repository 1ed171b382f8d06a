pub mod device_ref;
