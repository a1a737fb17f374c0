use std::{env, io, path::PathBuf};

pub struct Env {}

impl Env {
    pub const INPUT_DIR_NAME: &'static str = "perfs";
    pub const OUTPUT_DIR_NAME: &'static str = "courbe";

    pub fn proj_root() -> io::Result<PathBuf> {
        env::current_dir()
    }

    /// Directory the CSV performance logs are read from, unless overridden
    pub fn input_root() -> io::Result<PathBuf> {
        let mut path = Self::proj_root()?;
        path.push(Self::INPUT_DIR_NAME);
        Ok(path)
    }

    /// Directory the charts are written to, unless overridden
    pub fn output_root() -> io::Result<PathBuf> {
        let mut path = Self::proj_root()?;
        path.push(Self::OUTPUT_DIR_NAME);
        Ok(path)
    }
}
