use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    api::{PriceSource, ree},
    core::payload::DayPayload,
    prelude::*,
};

/// Previously saved market operator response.
pub struct PayloadFile(pub PathBuf);

#[async_trait]
impl PriceSource for PayloadFile {
    #[instrument(skip_all, fields(path = %self.0.display(), on = %on))]
    async fn get_day(&self, on: NaiveDate) -> Result<DayPayload> {
        info!("reading…");
        let body = tokio::fs::read(&self.0)
            .await
            .with_context(|| format!("failed to read `{}`", self.0.display()))?;
        ree::decode(&body, on)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::payload::SeriesKind;

    #[tokio::test]
    async fn test_get_day_ok() -> Result {
        let file = tempfile::NamedTempFile::new()?;
        std::fs::write(
            file.path(),
            r#"{"included": [{"type": "PVPC", "id": "1001", "attributes": {"values": [
                {"value": 100.0, "datetime": "2025-01-21T00:00:00.000+01:00"}
            ]}}]}"#,
        )?;
        let on = NaiveDate::from_ymd_opt(2025, 1, 21).unwrap();
        let payload = PayloadFile(file.path().to_path_buf()).get_day(on).await?;
        let official = payload.find(SeriesKind::OfficialTariff).context("no official tariff")?;
        assert_eq!(official.points.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = PayloadFile(PathBuf::from("/nonexistent/payload.json"));
        assert!(source.get_day(NaiveDate::MIN).await.is_err());
    }
}
