pub mod distro_info;
pub mod system_facts;
