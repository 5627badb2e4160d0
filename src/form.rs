//! Point Registration Form
//!
//! Plain form state for a new collection point. The reactive store wraps
//! this; everything here is synchronous and testable without a browser.

use leptos_dropzone::DroppedFile;

use crate::geo::LatLng;

/// Select value meaning "nothing chosen yet"
pub const UNSELECTED: &str = "0";

/// Free-text inputs of the form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Whatsapp,
}

impl FormField {
    /// Input and multipart field name
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Whatsapp => "whatsapp",
        }
    }
}

/// Request for the localities of one region
///
/// The generation ties a response to the selection that caused it, so a
/// late answer for a previously selected region can be recognized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalityQuery {
    pub uf: String,
    pub generation: u64,
}

/// File part of the registration request
#[derive(Clone, Debug, PartialEq)]
pub struct ImagePart {
    pub field: &'static str,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointForm {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub uf: String,
    pub city: String,
    pub position: LatLng,
    pub selected_items: Vec<u32>,
    pub image: Option<DroppedFile>,
    locality_generation: u64,
}

impl Default for PointForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            whatsapp: String::new(),
            uf: UNSELECTED.to_string(),
            city: UNSELECTED.to_string(),
            position: LatLng::default(),
            selected_items: Vec::new(),
            image: None,
            locality_generation: 0,
        }
    }
}

impl PointForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Whatsapp => &self.whatsapp,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Whatsapp => self.whatsapp = value,
        }
    }

    /// Add or remove an item; returns whether it is now selected
    pub fn toggle_item(&mut self, id: u32) -> bool {
        if let Some(index) = self.selected_items.iter().position(|&i| i == id) {
            self.selected_items.remove(index);
            false
        } else {
            self.selected_items.push(id);
            true
        }
    }

    pub fn is_selected(&self, id: u32) -> bool {
        self.selected_items.contains(&id)
    }

    pub fn set_position(&mut self, position: LatLng) {
        self.position = position;
    }

    pub fn set_image(&mut self, image: Option<DroppedFile>) {
        self.image = image;
    }

    /// Choose a region
    ///
    /// Resets the city and invalidates any locality request still in
    /// flight. Returns the query to run, or `None` when the placeholder was
    /// chosen or the region did not change.
    pub fn select_uf(&mut self, uf: &str) -> Option<LocalityQuery> {
        if self.uf == uf {
            return None;
        }
        self.uf = uf.to_string();
        self.city = UNSELECTED.to_string();
        self.locality_generation += 1;

        if uf == UNSELECTED {
            return None;
        }
        Some(LocalityQuery {
            uf: uf.to_string(),
            generation: self.locality_generation,
        })
    }

    pub fn select_city(&mut self, city: &str) {
        self.city = city.to_string();
    }

    /// Whether a locality response for `query` still matches the selection
    pub fn is_current(&self, query: &LocalityQuery) -> bool {
        query.generation == self.locality_generation && query.uf == self.uf
    }

    /// Selected item ids joined by commas, in selection order
    pub fn items_csv(&self) -> String {
        self.selected_items
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// File part for the chosen image; `None` leaves the field out entirely
    pub fn image_part(&self) -> Option<ImagePart> {
        self.image.as_ref().map(|image| ImagePart {
            field: "image",
            file_name: image.name.clone(),
            mime: image.mime_or_default().to_string(),
            bytes: image.bytes.clone(),
        })
    }

    /// Text fields of the registration request
    ///
    /// The image travels as a separate file part, see [`PointForm::image_part`].
    pub fn multipart_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("whatsapp", self.whatsapp.clone()),
            ("uf", self.uf.clone()),
            ("city", self.city.clone()),
            ("latitude", self.position.lat.to_string()),
            ("longitude", self.position.lng.to_string()),
            ("items", self.items_csv()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_placeholder_selection() {
        let form = PointForm::default();
        assert_eq!(form.uf, "0");
        assert_eq!(form.city, "0");
        assert_eq!(form.position, LatLng::new(0.0, 0.0));
        assert!(form.selected_items.is_empty());
        assert!(form.image.is_none());
    }

    #[test]
    fn test_set_field() {
        let mut form = PointForm::default();
        form.set_field(FormField::Name, "Mercado Verde".to_string());
        form.set_field(FormField::Whatsapp, "11912345678".to_string());

        assert_eq!(form.field(FormField::Name), "Mercado Verde");
        assert_eq!(form.field(FormField::Email), "");
        assert_eq!(form.whatsapp, "11912345678");
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let mut form = PointForm::default();
        form.toggle_item(4);

        assert!(form.toggle_item(2));
        assert!(form.is_selected(2));
        assert!(!form.toggle_item(2));
        assert!(!form.is_selected(2));
        assert_eq!(form.selected_items, vec![4]);
    }

    #[test]
    fn test_select_uf_issues_one_query() {
        let mut form = PointForm::default();

        let query = form.select_uf("SP").expect("region query");
        assert_eq!(query.uf, "SP");
        assert!(form.is_current(&query));

        // Re-selecting the same region is a no-op
        assert_eq!(form.select_uf("SP"), None);
        assert!(form.is_current(&query));
    }

    #[test]
    fn test_select_uf_resets_city() {
        let mut form = PointForm::default();
        form.select_uf("SP");
        form.select_city("Campinas");

        form.select_uf("RJ");
        assert_eq!(form.city, "0");

        form.select_city("Niterói");
        assert_eq!(form.select_uf("0"), None);
        assert_eq!(form.uf, "0");
        assert_eq!(form.city, "0");
    }

    #[test]
    fn test_stale_locality_query_is_rejected() {
        let mut form = PointForm::default();
        let first = form.select_uf("SP").unwrap();
        let second = form.select_uf("RJ").unwrap();

        assert!(!form.is_current(&first));
        assert!(form.is_current(&second));

        // Going back to SP still invalidates the first request
        let third = form.select_uf("SP").unwrap();
        assert!(!form.is_current(&first));
        assert!(form.is_current(&third));
    }

    #[test]
    fn test_multipart_fields() {
        let mut form = PointForm::default();
        form.set_field(FormField::Name, "Ecoponto".to_string());
        form.set_field(FormField::Email, "eco@ponto.test".to_string());
        form.set_field(FormField::Whatsapp, "21999990000".to_string());
        form.select_uf("RJ");
        form.select_city("Niterói");
        form.set_position(LatLng::new(-22.8832, -43.1034));
        form.toggle_item(1);
        form.toggle_item(2);
        form.toggle_item(3);

        let fields = form.multipart_fields();
        let keys: Vec<&str> = fields.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec!["name", "email", "whatsapp", "uf", "city", "latitude", "longitude", "items"]
        );
        assert_eq!(fields[3].1, "RJ");
        assert_eq!(fields[5].1, "-22.8832");
        assert_eq!(fields[6].1, "-43.1034");
        assert_eq!(fields[7].1, "1,2,3");
    }

    #[test]
    fn test_no_image_part_without_file() {
        let form = PointForm::default();
        assert_eq!(form.image_part(), None);
    }

    #[test]
    fn test_chosen_file_becomes_image_part() {
        let mut form = PointForm::default();
        form.set_image(Some(DroppedFile {
            name: "fachada.png".to_string(),
            mime: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
            preview_url: "blob:preview".to_string(),
        }));

        let part = form.image_part().expect("image part");
        assert_eq!(part.field, "image");
        assert_eq!(part.file_name, "fachada.png");
        assert_eq!(part.mime, "image/png");
        assert_eq!(part.bytes, vec![0x89, b'P', b'N', b'G']);

        // Text fields are unchanged by the file
        assert_eq!(form.multipart_fields().len(), 8);

        form.set_image(Some(DroppedFile {
            name: "sem-tipo".to_string(),
            ..Default::default()
        }));
        assert_eq!(form.image_part().unwrap().mime, "application/octet-stream");

        form.set_image(None);
        assert_eq!(form.image_part(), None);
    }

    #[test]
    fn test_items_csv_empty() {
        assert_eq!(PointForm::default().items_csv(), "");
    }
}
