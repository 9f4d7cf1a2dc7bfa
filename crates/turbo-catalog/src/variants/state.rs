//! Variant combination state and its transitions.
//!
//! [`VariantState`] holds the axis list and the flattened SKU list for one
//! product form. Every transition borrows the current state and returns a
//! new one; on error the caller keeps the state it already has.
//!
//! The SKU list tracks the cartesian product of the non-blank options of all
//! axes. Growing an axis appends entries for new combinations only, so
//! prices and quantities typed into existing rows survive.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::BuilderConfig;
use crate::variants::{SkuEntry, SkuField, VariantAxis};
use crate::CatalogError;

/// Axis and SKU lists of one product being edited.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariantState {
    axes: Vec<VariantAxis>,
    skus: Vec<SkuEntry>,
    config: BuilderConfig,
}

impl VariantState {
    /// Create a state with no axes.
    pub fn new(config: BuilderConfig) -> Self {
        Self {
            axes: Vec::new(),
            skus: Vec::new(),
            config,
        }
    }

    /// Create a state with one blank slot on each named axis.
    pub fn seeded<I, S>(names: I, config: BuilderConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            axes: names.into_iter().map(VariantAxis::seeded).collect(),
            skus: Vec::new(),
            config,
        }
    }

    /// Restore a state from a fetched product, keeping its SKUs as they are.
    pub fn from_parts(axes: Vec<VariantAxis>, skus: Vec<SkuEntry>, config: BuilderConfig) -> Self {
        Self { axes, skus, config }
    }

    /// Split into axis and SKU lists.
    pub fn into_parts(self) -> (Vec<VariantAxis>, Vec<SkuEntry>) {
        (self.axes, self.skus)
    }

    pub fn axes(&self) -> &[VariantAxis] {
        &self.axes
    }

    pub fn skus(&self) -> &[SkuEntry] {
        &self.skus
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Position of the axis with this name.
    pub fn axis_index(&self, name: &str) -> Option<usize> {
        self.axes.iter().position(|a| a.name == name)
    }

    /// The axis that carries images, if present.
    pub fn image_axis(&self) -> Option<&VariantAxis> {
        self.axes
            .iter()
            .find(|a| a.carries_images(&self.config.image_axis))
    }

    /// Whether `add_option` on this axis would currently be accepted.
    pub fn can_add_option(&self, axis: usize) -> bool {
        self.axis_at(axis)
            .and_then(|a| self.check_can_grow(a))
            .is_ok()
    }

    /// Append an option to an axis and generate SKUs for new combinations.
    ///
    /// Rejected with [`CatalogError::IncompleteOption`] while the axis's last
    /// option is blank.
    pub fn add_option(&self, axis: usize, value: impl Into<String>) -> Result<Self, CatalogError> {
        let target = self.axis_at(axis)?;
        if let Err(e) = self.check_can_grow(target) {
            warn!(axis = %target.name, error = %e, "add option rejected");
            return Err(e);
        }

        let mut next = self.clone();
        next.axes[axis].options.push(value.into());
        let added = next.reconcile();

        debug!(
            axis = %next.axes[axis].name,
            options = next.axes[axis].options.len(),
            added,
            skus = next.skus.len(),
            "option added"
        );
        Ok(next)
    }

    /// Overwrite the text of an option slot.
    ///
    /// SKUs are not regenerated here; the next `add_option` or
    /// `delete_option` picks the new text up.
    pub fn set_option(
        &self,
        axis: usize,
        slot: usize,
        value: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        self.option_at(axis, slot)?;

        let mut next = self.clone();
        next.axes[axis].options[slot] = value.into();
        Ok(next)
    }

    /// Remove an option by position.
    ///
    /// SKUs that referenced the option are dropped, positions after it on the
    /// same axis shift down by one, and an image paired with the slot is
    /// removed along with it.
    pub fn delete_option(&self, axis: usize, slot: usize) -> Result<Self, CatalogError> {
        self.option_at(axis, slot)?;

        let mut next = self.clone();
        let image_axis = next.config.image_axis.clone();
        let target = &mut next.axes[axis];
        let removed = target.options.remove(slot);
        if target.carries_images(&image_axis) && slot < target.images.len() {
            target.images.remove(slot);
        }

        let before = next.skus.len();
        next.skus
            .retain(|sku| sku.tier_index.get(axis).copied() != Some(slot));
        let pruned = before - next.skus.len();
        for sku in &mut next.skus {
            if let Some(position) = sku.tier_index.get_mut(axis) {
                if *position > slot {
                    *position -= 1;
                }
            }
        }
        let added = next.reconcile();

        debug!(
            axis = %next.axes[axis].name,
            option = %removed,
            pruned,
            added,
            skus = next.skus.len(),
            "option deleted"
        );
        Ok(next)
    }

    /// Overwrite the price or quantity of one SKU from raw cell text.
    ///
    /// Unparseable input becomes zero; no sign check is applied.
    pub fn update_cell(&self, sku: usize, field: SkuField, raw: &str) -> Result<Self, CatalogError> {
        if sku >= self.skus.len() {
            return Err(CatalogError::SkuOutOfRange {
                index: sku,
                len: self.skus.len(),
            });
        }

        let mut next = self.clone();
        next.skus[sku].apply(field, raw);
        debug!(sku, field = %field, raw, "sku cell updated");
        Ok(next)
    }

    /// Append an image reference to the image axis.
    ///
    /// Attaching a reference that is already present changes nothing.
    pub fn attach_axis_image(
        &self,
        axis_name: &str,
        image_ref: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let image_ref = image_ref.into();
        let index = self.image_target(axis_name)?;

        if self.axes[index].images.contains(&image_ref) {
            debug!(axis = axis_name, image = %image_ref, "image already attached");
            return Ok(self.clone());
        }
        self.check_image_slot(index)?;

        let mut next = self.clone();
        next.axes[index].images.push(image_ref);
        debug!(
            axis = axis_name,
            images = next.axes[index].images.len(),
            "image attached"
        );
        Ok(next)
    }

    /// Whether a new image could be attached to this axis right now.
    ///
    /// Callers uploading a file check this first so a rejected attach never
    /// leaves an orphaned upload behind.
    pub fn check_can_attach(&self, axis_name: &str) -> Result<(), CatalogError> {
        let index = self.image_target(axis_name)?;
        self.check_image_slot(index)
    }

    /// Append a new axis holding one blank slot.
    ///
    /// Existing SKUs have no position on the new axis, so the SKU list is
    /// cleared and regenerated by the next `add_option`.
    pub fn add_axis(&self, name: impl Into<String>) -> Result<Self, CatalogError> {
        let name = name.into();
        if self.axis_index(&name).is_some() {
            return Err(CatalogError::DuplicateAxis(name));
        }

        let mut next = self.clone();
        next.axes.push(VariantAxis::seeded(name));
        next.skus.clear();
        Ok(next)
    }

    /// Number of SKUs the current options call for.
    pub fn expected_sku_count(&self) -> usize {
        if self.axes.is_empty() {
            return 0;
        }
        self.axes.iter().map(VariantAxis::filled_len).product()
    }

    /// True if the SKU list is exactly the product of non-blank options.
    pub fn is_complete(&self) -> bool {
        let expected: HashSet<Vec<usize>> = combinations(&self.axes).into_iter().collect();
        let mut seen = HashSet::with_capacity(self.skus.len());
        self.skus.len() == expected.len()
            && self
                .skus
                .iter()
                .all(|sku| expected.contains(&sku.tier_index) && seen.insert(&sku.tier_index))
    }

    /// Human-readable name of a SKU's combination (e.g. "Red / M").
    pub fn sku_label(&self, sku: &SkuEntry) -> String {
        sku.tier_index
            .iter()
            .zip(&self.axes)
            .map(|(&i, axis)| axis.option(i).unwrap_or("?"))
            .collect::<Vec<_>>()
            .join(" / ")
    }

    fn image_target(&self, axis_name: &str) -> Result<usize, CatalogError> {
        let index = self
            .axis_index(axis_name)
            .ok_or_else(|| CatalogError::UnknownAxis(axis_name.to_string()))?;
        if !self.axes[index].carries_images(&self.config.image_axis) {
            return Err(CatalogError::NotImageAxis(axis_name.to_string()));
        }
        Ok(index)
    }

    fn check_image_slot(&self, index: usize) -> Result<(), CatalogError> {
        let target = &self.axes[index];
        if self.config.enforce_image_coupling && target.images.len() >= target.options.len() {
            warn!(axis = %target.name, "image rejected: every option already has one");
            return Err(CatalogError::ImageSlotsFull {
                axis: target.name.clone(),
            });
        }
        Ok(())
    }

    fn axis_at(&self, index: usize) -> Result<&VariantAxis, CatalogError> {
        self.axes.get(index).ok_or(CatalogError::AxisOutOfRange {
            index,
            len: self.axes.len(),
        })
    }

    fn option_at(&self, axis: usize, slot: usize) -> Result<&str, CatalogError> {
        let target = self.axis_at(axis)?;
        target
            .option(slot)
            .ok_or_else(|| CatalogError::OptionOutOfRange {
                axis: target.name.clone(),
                index: slot,
                len: target.options.len(),
            })
    }

    fn check_can_grow(&self, axis: &VariantAxis) -> Result<(), CatalogError> {
        if !axis.last_is_filled() {
            return Err(CatalogError::IncompleteOption {
                axis: axis.name.clone(),
            });
        }
        if self.config.enforce_image_coupling
            && axis.carries_images(&self.config.image_axis)
            && axis.images.len() < axis.options.len()
        {
            return Err(CatalogError::ImagesPending {
                axis: axis.name.clone(),
                images: axis.images.len(),
                options: axis.options.len(),
            });
        }
        Ok(())
    }

    /// Option values a SKU points at, if all of its positions resolve.
    fn value_key(&self, tier_index: &[usize]) -> Option<Vec<String>> {
        if tier_index.len() != self.axes.len() {
            return None;
        }
        tier_index
            .iter()
            .zip(&self.axes)
            .map(|(&i, axis)| axis.option(i).map(|v| v.trim().to_string()))
            .collect()
    }

    /// Bring the SKU list back to one entry per combination, matched by
    /// option values. Entries whose combination still exists keep their
    /// cells; entries pointing at a blank, missing or repeated combination
    /// are dropped. Returns how many were added.
    fn reconcile(&mut self) -> usize {
        let mut known: HashSet<Vec<String>> = HashSet::with_capacity(self.skus.len());
        let before = self.skus.len();
        let skus = std::mem::take(&mut self.skus);
        let kept: Vec<SkuEntry> = skus
            .into_iter()
            .filter(|sku| match self.value_key(&sku.tier_index) {
                Some(key) if key.iter().all(|v| !v.is_empty()) => known.insert(key),
                _ => false,
            })
            .collect();
        let dropped = before - kept.len();
        self.skus = kept;
        if dropped > 0 {
            debug!(dropped, "stale skus dropped");
        }

        let mut added = 0;
        for tier_index in combinations(&self.axes) {
            let Some(key) = self.value_key(&tier_index) else {
                continue;
            };
            if known.insert(key) {
                self.skus.push(SkuEntry::new(tier_index));
                added += 1;
            }
        }
        added
    }
}

/// Cartesian product of non-blank option positions, first axis outermost.
fn combinations(axes: &[VariantAxis]) -> Vec<Vec<usize>> {
    if axes.is_empty() {
        return Vec::new();
    }

    let mut acc: Vec<Vec<usize>> = vec![Vec::new()];
    for axis in axes {
        let positions: Vec<usize> = axis.non_empty_options().map(|(i, _)| i).collect();
        acc = acc
            .into_iter()
            .flat_map(|prefix| {
                positions.iter().map(move |&p| {
                    let mut tier_index = prefix.clone();
                    tier_index.push(p);
                    tier_index
                })
            })
            .collect();
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn color_size(colors: &[&str], sizes: &[&str]) -> VariantState {
        VariantState::from_parts(
            vec![
                VariantAxis::with_options("Color", colors.iter().copied()),
                VariantAxis::with_options("Size", sizes.iter().copied()),
            ],
            Vec::new(),
            BuilderConfig::default(),
        )
    }

    fn tiers(state: &VariantState) -> Vec<Vec<usize>> {
        state.skus().iter().map(|s| s.tier_index.clone()).collect()
    }

    #[test]
    fn test_combinations_order() {
        let state = color_size(&["Red", "Blue"], &["S", "M"]);
        assert_eq!(
            combinations(state.axes()),
            vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]
        );
    }

    #[test]
    fn test_combinations_skip_blank_options() {
        let state = color_size(&["Red", " ", "Blue"], &["", "M"]);
        assert_eq!(combinations(state.axes()), vec![vec![0, 1], vec![2, 1]]);
    }

    #[test]
    fn test_combinations_empty_when_axis_has_no_options() {
        let state = color_size(&["Red"], &[""]);
        assert!(combinations(state.axes()).is_empty());
        assert!(combinations(&[]).is_empty());
    }

    #[test]
    fn test_add_option_generates_product() {
        let state = color_size(&["Red"], &["S"]);
        let state = state.add_option(1, "M").unwrap();

        assert_eq!(state.axes()[1].options, vec!["S", "M"]);
        assert_eq!(tiers(&state), vec![vec![0, 0], vec![0, 1]]);
        assert!(state.skus().iter().all(|s| s.is_default));
        assert!(state.is_complete());
    }

    #[test]
    fn test_add_blank_option_then_fill() {
        let state = color_size(&["Red"], &["S"]);
        let state = state.add_option(0, "").unwrap();
        assert_eq!(tiers(&state), vec![vec![0, 0]]);

        let state = state.set_option(0, 1, "Blue").unwrap();
        // typing alone does not regenerate
        assert_eq!(state.skus().len(), 1);

        let state = state.add_option(1, "M").unwrap();
        assert_eq!(state.skus().len(), 4);
        assert!(state.is_complete());
    }

    #[test]
    fn test_add_option_rejects_blank_last() {
        let state = color_size(&["Red", "  "], &["S"]);
        let err = state.add_option(0, "").unwrap_err();
        assert_eq!(
            err,
            CatalogError::IncompleteOption {
                axis: "Color".to_string()
            }
        );
        assert!(err.is_validation());
        assert!(!state.can_add_option(0));
        assert!(state.can_add_option(1));
    }

    #[test]
    fn test_add_option_preserves_existing_cells() {
        let state = color_size(&["Red"], &["S"]).add_option(1, "M").unwrap();
        let state = state.update_cell(0, SkuField::Price, "19.90").unwrap();
        let state = state.update_cell(1, SkuField::Quantity, "7").unwrap();

        let state = state.add_option(0, "Blue").unwrap();
        assert_eq!(state.skus().len(), 4);
        assert_eq!(state.skus()[0].price, 19.9);
        assert_eq!(state.skus()[1].quantity, 7);
        for sku in &state.skus()[2..] {
            assert_eq!(sku.price, 0.0);
            assert_eq!(sku.quantity, 0);
        }
    }

    #[test]
    fn test_add_option_matches_existing_by_value() {
        // An existing SKU stored against a renamed slot still counts.
        let mut state = color_size(&["Red"], &["S"]).add_option(1, "M").unwrap();
        state = state.set_option(1, 1, "L").unwrap();
        let state = state.add_option(1, "XL").unwrap();

        assert_eq!(tiers(&state), vec![vec![0, 0], vec![0, 1], vec![0, 2]]);
        assert_eq!(state.sku_label(&state.skus()[1]), "Red / L");
    }

    #[test]
    fn test_cleared_slot_drops_its_skus() {
        let state = color_size(&["Red"], &["S"]).add_option(0, "Blue").unwrap();
        let state = state.update_cell(0, SkuField::Price, "12").unwrap();
        let state = state.set_option(0, 1, "").unwrap();

        let state = state.add_option(1, "M").unwrap();
        assert_eq!(tiers(&state), vec![vec![0, 0], vec![0, 1]]);
        assert_eq!(state.sku_label(&state.skus()[1]), "Red / M");
        assert_eq!(state.skus()[0].price, 12.0);
        assert!(state.is_complete());
    }

    #[test]
    fn test_blanked_slot_dropped_on_delete() {
        let state = color_size(&["Red", "Blue"], &["S", "M"]).add_option(1, "L").unwrap();
        assert_eq!(state.skus().len(), 6);
        let state = state.set_option(1, 1, "").unwrap();

        let state = state.delete_option(1, 2).unwrap();
        assert_eq!(state.skus().len(), 2);
        assert!(state
            .skus()
            .iter()
            .all(|s| state.sku_label(s).ends_with("/ S")));
        assert!(state.is_complete());
    }

    #[test]
    fn test_reconcile_collapses_duplicate_entries() {
        let mut stale = SkuEntry::new(vec![0, 0]);
        stale.price = 3.0;
        let state = VariantState::from_parts(
            vec![
                VariantAxis::with_options("Color", ["Red"]),
                VariantAxis::with_options("Size", ["S"]),
            ],
            vec![stale, SkuEntry::new(vec![0, 0]), SkuEntry::new(vec![4, 0])],
            BuilderConfig::default(),
        );

        let state = state.add_option(1, "M").unwrap();
        assert_eq!(tiers(&state), vec![vec![0, 0], vec![0, 1]]);
        assert_eq!(state.skus()[0].price, 3.0);
    }

    #[test]
    fn test_out_of_range_indices() {
        let state = color_size(&["Red"], &["S"]);
        assert!(matches!(
            state.add_option(5, "x"),
            Err(CatalogError::AxisOutOfRange { index: 5, len: 2 })
        ));
        assert!(matches!(
            state.set_option(0, 3, "x"),
            Err(CatalogError::OptionOutOfRange { index: 3, .. })
        ));
        assert!(matches!(
            state.update_cell(0, SkuField::Price, "1"),
            Err(CatalogError::SkuOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_delete_option_prunes_and_shifts() {
        let state = color_size(&["Red"], &["S"])
            .add_option(0, "Blue")
            .unwrap()
            .add_option(0, "Green")
            .unwrap();
        assert_eq!(state.skus().len(), 3);
        let state = state.update_cell(2, SkuField::Price, "5").unwrap();

        let state = state.delete_option(0, 1).unwrap();
        assert_eq!(state.axes()[0].options, vec!["Red", "Green"]);
        assert_eq!(tiers(&state), vec![vec![0, 0], vec![1, 0]]);
        assert_eq!(state.sku_label(&state.skus()[1]), "Green / S");
        assert_eq!(state.skus()[1].price, 5.0);
        assert!(state.is_complete());
    }

    #[test]
    fn test_delete_last_option_of_axis_clears_skus() {
        let state = color_size(&["Red"], &["S"]).add_option(0, "Blue").unwrap();
        let state = state.delete_option(1, 0).unwrap();
        assert!(state.axes()[1].options.is_empty());
        assert!(state.skus().is_empty());
        assert!(state.is_complete());
    }

    #[test]
    fn test_delete_option_removes_paired_image() {
        let state = color_size(&["Red", "Blue"], &["S"])
            .attach_axis_image("Color", "red.png")
            .unwrap()
            .attach_axis_image("Color", "blue.png")
            .unwrap();
        let state = state.delete_option(0, 0).unwrap();
        assert_eq!(state.axes()[0].images, vec!["blue.png"]);
    }

    #[test]
    fn test_attach_image_dedup() {
        let state = color_size(&["Red"], &["S"]);
        let state = state.attach_axis_image("Color", "red.png").unwrap();
        let state = state.attach_axis_image("Color", "red.png").unwrap();
        assert_eq!(state.axes()[0].images, vec!["red.png"]);
    }

    #[test]
    fn test_attach_image_rejects_other_axes() {
        let state = color_size(&["Red"], &["S"]);
        assert_eq!(
            state.attach_axis_image("Size", "s.png").unwrap_err(),
            CatalogError::NotImageAxis("Size".to_string())
        );
        assert_eq!(
            state.attach_axis_image("Material", "m.png").unwrap_err(),
            CatalogError::UnknownAxis("Material".to_string())
        );
    }

    #[test]
    fn test_image_coupling_enforced_when_enabled() {
        let config = BuilderConfig::default().with_image_coupling(true);
        let state = VariantState::seeded(["Color", "Size"], config)
            .set_option(0, 0, "Red")
            .unwrap();

        assert!(matches!(
            state.add_option(0, ""),
            Err(CatalogError::ImagesPending {
                images: 0,
                options: 1,
                ..
            })
        ));

        assert!(state.check_can_attach("Color").is_ok());
        let state = state.attach_axis_image("Color", "red.png").unwrap();
        assert!(matches!(
            state.attach_axis_image("Color", "other.png"),
            Err(CatalogError::ImageSlotsFull { .. })
        ));
        assert!(matches!(
            state.check_can_attach("Color"),
            Err(CatalogError::ImageSlotsFull { .. })
        ));
        // re-attaching a known ref stays a no-op even when full
        assert!(state.attach_axis_image("Color", "red.png").is_ok());
        let state = state.add_option(0, "").unwrap();
        assert_eq!(state.axes()[0].options.len(), 2);

        // only the image axis is coupled
        let state = state.set_option(1, 0, "M").unwrap();
        assert!(state.can_add_option(1));
    }

    #[test]
    fn test_image_axis_is_configurable() {
        let config = BuilderConfig::default().with_image_axis("Finish");
        let state = VariantState::seeded(["Finish", "Size"], config);
        assert!(state.attach_axis_image("Finish", "matte.png").is_ok());
        assert_eq!(state.image_axis().map(|a| a.name.as_str()), Some("Finish"));
    }

    #[test]
    fn test_add_axis_clears_skus() {
        let state = color_size(&["Red"], &["S"]).add_option(1, "M").unwrap();
        let state = state.add_axis("Material").unwrap();
        assert_eq!(state.axes().len(), 3);
        assert!(state.skus().is_empty());

        let state = state
            .set_option(2, 0, "Cotton")
            .unwrap()
            .add_option(2, "Linen")
            .unwrap();
        assert_eq!(state.skus().len(), 4);
        assert!(state.skus().iter().all(|s| s.tier_index.len() == 3));
        assert!(matches!(
            state.add_axis("Size"),
            Err(CatalogError::DuplicateAxis(_))
        ));
    }

    #[test]
    fn test_expected_sku_count() {
        assert_eq!(VariantState::default().expected_sku_count(), 0);
        assert_eq!(color_size(&["Red", "Blue", ""], &["S", "M", "L"]).expected_sku_count(), 6);
    }

    #[test]
    fn test_incomplete_detects_duplicates() {
        let state = VariantState::from_parts(
            vec![
                VariantAxis::with_options("Color", ["Red"]),
                VariantAxis::with_options("Size", ["S"]),
            ],
            vec![SkuEntry::new(vec![0, 0]), SkuEntry::new(vec![0, 0])],
            BuilderConfig::default(),
        );
        assert!(!state.is_complete());
    }
}
