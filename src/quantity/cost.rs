quantity!(
    /// Money in euro.
    Cost,
    suffix: "€",
    precision: 3
);

impl Cost {
    pub const ONE_CENT: Self = Self(0.01);
}
