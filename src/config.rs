use std::path::{Path, PathBuf};

use clap::Parser;

use crate::dashboard::DashboardConfig;

/// Command line options. Every option can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "salary-explorer", version, about = "Explore data-science salaries by country, role, level and remote ratio")]
pub struct Args {
    /// Dataset to load (CSV, JSON records or Parquet); overrides --data
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Dataset to load when no PATH is given
    #[arg(long, value_name = "PATH", env = "SALARY_DATA", default_value = "ds_salaries.csv")]
    pub data: PathBuf,

    /// Number of job roles listed in the recommendations
    #[arg(long, env = "SALARY_TOP_JOBS", default_value_t = 5)]
    pub top_jobs: usize,

    /// Number of experience levels listed in the recommendations
    #[arg(long, env = "SALARY_TOP_LEVELS", default_value_t = 3)]
    pub top_levels: usize,
}

impl Args {
    /// The dataset path, positional argument first.
    pub fn data_path(&self) -> &Path {
        self.path.as_deref().unwrap_or(&self.data)
    }

    pub fn dashboard_config(&self) -> DashboardConfig {
        DashboardConfig {
            top_jobs: self.top_jobs,
            top_levels: self.top_levels,
        }
    }
}
