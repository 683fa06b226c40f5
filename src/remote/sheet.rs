use super::{RemoteClient, SyncError};
use crate::grid::{Grid, grid_from_csv};
use tracing::debug;

impl RemoteClient {
    /// Downloads the CSV export of the timetable spreadsheet.
    pub async fn fetch_schedule_grid(&self) -> Result<Grid, SyncError> {
        debug!(url = %self.sheet_url(), "fetching schedule spreadsheet");
        let response = self.http().get(self.sheet_url()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }
        let text = response.text().await?;
        grid_from_csv(&text).map_err(|err| SyncError::Decode(err.to_string()))
    }
}
