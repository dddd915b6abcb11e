quantity!(
    /// Euro per megawatt-hour, the unit the market operator publishes prices in.
    MegawattHourPrice,
    suffix: "€/MWh",
    precision: 2
);

quantity!(
    /// Euro per kilowatt-hour.
    KilowattHourPrice,
    suffix: "€/kWh",
    precision: 3
);

impl From<MegawattHourPrice> for KilowattHourPrice {
    fn from(price: MegawattHourPrice) -> Self {
        Self(price.0 / 1000.0)
    }
}
