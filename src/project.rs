use crate::error::Error;
use crate::filter::Filter;
use crate::image::{Image, PixelBuffer};
use crate::layer::Layer;
use crate::position::Position;
use crate::Result;

pub const DEFAULT_MAX_VALUE: u16 = 255;

/// an ordered stack of layers sharing one dimension and max channel value
///
/// the first layer is the bottom of the stack
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Project {
    height: usize,
    width: usize,
    max_value: u16,
    layers: Vec<Layer>,
}

impl Project {
    /// a project holding only the opaque white background layer
    pub fn new(height: usize, width: usize, max_value: u16) -> Result<Self> {
        let background = Layer::background(height, width, max_value)?;
        log::info!(
            "Started project with height {}, width {} and max value {}",
            height,
            width,
            max_value
        );
        Ok(Self {
            height,
            width,
            max_value,
            layers: vec![background],
        })
    }

    /// a project made of already built layers, bottom first
    ///
    /// no background is installed, every layer is checked like `add_given_layer`
    pub fn from_layers(
        height: usize,
        width: usize,
        max_value: u16,
        layers: Vec<Layer>,
    ) -> Result<Self> {
        let mut project = Self {
            height,
            width,
            max_value,
            layers: Vec::with_capacity(layers.len()),
        };
        for layer in layers {
            project.add_given_layer(layer)?;
        }
        Ok(project)
    }

    /// discards every layer and starts over with a fresh background
    pub fn start_model(&mut self, height: usize, width: usize, max_value: u16) -> Result<()> {
        *self = Self::new(height, width, max_value)?;
        Ok(())
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn max_value(&self) -> u16 {
        self.max_value
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.has_name(name))
    }

    fn check_name_is_free(&self, name: &str) -> Result<()> {
        if self.position_of(name).is_some() {
            return Err(Error::DuplicateLayerName(name.to_owned()));
        }
        Ok(())
    }

    /// appends a new transparent layer on top of the stack
    pub fn add_layer(&mut self, name: &str) -> Result<()> {
        self.check_name_is_free(name)?;
        let layer = Layer::new(name, self.height, self.width, self.max_value)?;
        log::debug!("Added layer '{}'", name);
        self.layers.push(layer);
        Ok(())
    }

    /// appends an existing layer on top of the stack
    pub fn add_given_layer(&mut self, layer: Layer) -> Result<()> {
        self.check_name_is_free(layer.name())?;
        if layer.height() != self.height || layer.width() != self.width {
            return Err(Error::LayerDimensionMismatch {
                name: layer.name().to_owned(),
                expected_height: self.height,
                expected_width: self.width,
                found_height: layer.height(),
                found_width: layer.width(),
            });
        }
        if layer.max_value() != self.max_value {
            return Err(Error::ChannelValueOutOfRange {
                value: layer.max_value(),
                max_value: self.max_value,
            });
        }
        log::debug!("Added given layer '{}'", layer.name());
        self.layers.push(layer);
        Ok(())
    }

    /// removes the layer with the given name, nothing happens when it is absent
    pub fn remove_layer(&mut self, name: &str) -> Option<Layer> {
        let index = self.position_of(name)?;
        log::debug!("Removed layer '{}'", name);
        Some(self.layers.remove(index))
    }

    pub fn layer(&self, name: &str) -> Result<&Layer> {
        self.position_of(name)
            .map(|index| &self.layers[index])
            .ok_or_else(|| Error::LayerNotFound(name.to_owned()))
    }

    pub fn layer_mut(&mut self, name: &str) -> Result<&mut Layer> {
        match self.position_of(name) {
            Some(index) => Ok(&mut self.layers[index]),
            None => Err(Error::LayerNotFound(name.to_owned())),
        }
    }

    /// places `image` with its top-left corner at (`row`, `col`) of the named layer
    pub fn add_image_to_layer(
        &mut self,
        layer_name: &str,
        image: impl Into<Image>,
        row: isize,
        col: isize,
    ) -> Result<()> {
        let image = image.into().at(Position::new(row, col));
        self.layer_mut(layer_name)?.add_image(image);
        Ok(())
    }

    /// sets the filter of the named layer from its identifier
    pub fn set_filter(&mut self, layer_name: &str, filter_id: &str) -> Result<()> {
        let filter: Filter = filter_id.parse()?;
        self.layer_mut(layer_name)?.set_filter(filter);
        log::debug!("Set filter of layer '{}' to {}", layer_name, filter);
        Ok(())
    }

    /// every layer with its filter applied against the composite of all layers beneath it
    pub fn render_layers(&self) -> Vec<Layer> {
        self.render()
            .map(|(rendered, _)| rendered)
            .unwrap_or_default()
    }

    /// flattens the whole stack into a single layer
    pub fn save_image(&self) -> Result<Layer> {
        let (rendered, composite) = self.render().ok_or(Error::EmptyProject)?;
        let bottom = &rendered[0];
        Layer::with_canvas(bottom.name(), Filter::Normal, self.max_value, composite)
    }

    fn render(&self) -> Option<(Vec<Layer>, PixelBuffer)> {
        let (bottom, rest) = self.layers.split_first()?;
        let bottom = bottom.apply_filter(None);
        let mut composite = bottom.canvas().clone();
        let mut rendered = Vec::with_capacity(self.layers.len());
        rendered.push(bottom);
        for layer in rest {
            let filtered = layer.apply_filter(Some(&composite));
            composite = filtered.combine(&composite);
            rendered.push(filtered);
        }
        Some((rendered, composite))
    }
}

#[cfg(test)]
mod test {
    use super::Project;
    use crate::error::Error;
    use crate::filter::Filter;
    use crate::image::PixelBuffer;
    use crate::layer::Layer;
    use crate::pixel::Pixel;
    use crate::position::Position;

    fn solid(height: usize, width: usize, rgba: [u16; 4]) -> PixelBuffer {
        let pixel = Pixel::new(rgba[0], rgba[1], rgba[2], rgba[3], 255, Position::ORIGIN).unwrap();
        PixelBuffer::new(height, width, vec![pixel; height * width]).unwrap()
    }

    #[test]
    fn invalid_dimension() {
        assert!(matches!(Project::new(0, 2, 255), Err(Error::InvalidDimension { .. })));
        assert!(matches!(Project::new(2, 0, 255), Err(Error::InvalidDimension { .. })));
        assert!(matches!(Project::new(2, 2, 0), Err(Error::InvalidDimension { .. })));
    }

    #[test]
    fn new_project_flattens_to_opaque_white() {
        let project = Project::new(2, 2, 255).unwrap();
        let flattened = project.save_image().unwrap();
        assert_eq!(flattened.name(), "background");
        assert_eq!(flattened.canvas().pixels().count(), 4);
        for pixel in flattened.canvas().pixels() {
            assert_eq!(pixel.rgba(), [255, 255, 255, 255]);
        }
    }

    #[test]
    fn duplicate_layer_name_ignores_case() {
        let mut project = Project::new(2, 2, 255).unwrap();
        project.add_layer("x").unwrap();
        assert!(matches!(project.add_layer("x"), Err(Error::DuplicateLayerName(_))));
        assert!(matches!(project.add_layer("X"), Err(Error::DuplicateLayerName(_))));
        assert!(matches!(
            project.add_layer("Background"),
            Err(Error::DuplicateLayerName(_))
        ));
    }

    #[test]
    fn missing_layer() {
        let mut project = Project::new(2, 2, 255).unwrap();
        assert!(matches!(project.layer("missing"), Err(Error::LayerNotFound(name)) if name == "missing"));
        assert!(matches!(
            project.set_filter("missing", "invert"),
            Err(Error::LayerNotFound(_))
        ));
    }

    #[test]
    fn unknown_filter() {
        let mut project = Project::new(2, 2, 255).unwrap();
        project.add_layer("first").unwrap();
        assert!(matches!(
            project.set_filter("first", "sepia"),
            Err(Error::UnknownFilter(_))
        ));
        project.set_filter("FIRST", "darken").unwrap();
        assert_eq!(project.layer("first").unwrap().filter(), Filter::Darken);
    }

    #[test]
    fn remove_layer_is_noop_when_absent() {
        let mut project = Project::new(2, 2, 255).unwrap();
        project.add_layer("first").unwrap();
        assert!(project.remove_layer("second").is_none());
        assert_eq!(project.layers().len(), 2);
        assert!(project.remove_layer("first").is_some());
        assert_eq!(project.layers().len(), 1);
    }

    #[test]
    fn red_component_layer_over_white_background() {
        let mut project = Project::new(2, 2, 255).unwrap();
        project.add_layer("first").unwrap();
        project
            .add_image_to_layer("first", solid(1, 1, [150, 50, 89, 255]), 0, 0)
            .unwrap();
        project.set_filter("first", "red-component").unwrap();
        let flattened = project.save_image().unwrap();
        let pixel = flattened.pixel(Position::ORIGIN).unwrap();
        assert_eq!(pixel.rgba(), [150, 0, 0, 255]);
        let untouched = flattened.pixel(Position::new(1, 1)).unwrap();
        assert_eq!(untouched.rgba(), [255, 255, 255, 255]);
    }

    #[test]
    fn filters_see_composite_of_all_layers_below() {
        let mut project = Project::new(1, 1, 255).unwrap();
        project.add_layer("black").unwrap();
        project
            .add_image_to_layer("black", solid(1, 1, [0, 0, 0, 255]), 0, 0)
            .unwrap();
        project.add_layer("empty").unwrap();
        project.add_layer("inverted").unwrap();
        project
            .add_image_to_layer("inverted", solid(1, 1, [200, 100, 50, 255]), 0, 0)
            .unwrap();
        project.set_filter("inverted", "invert").unwrap();
        let rendered = project.render_layers();
        assert_eq!(rendered.len(), 4);
        // the backdrop of 'inverted' is black though the layer directly below is transparent
        let inverted = rendered[3].pixel(Position::ORIGIN).unwrap();
        assert_eq!(inverted.rgba(), [200, 100, 50, 255]);
    }

    #[test]
    fn render_layers_keep_order_and_filters() {
        let mut project = Project::new(1, 2, 255).unwrap();
        project.add_layer("first").unwrap();
        project.add_layer("second").unwrap();
        project.set_filter("second", "brighten").unwrap();
        let rendered = project.render_layers();
        let names: Vec<_> = rendered.iter().map(|layer| layer.name()).collect();
        assert_eq!(names, ["background", "first", "second"]);
        assert_eq!(rendered[2].filter(), Filter::Brighten);
    }

    #[test]
    fn start_model_discards_previous_layers() {
        let mut project = Project::new(2, 2, 255).unwrap();
        project.add_layer("first").unwrap();
        project.start_model(3, 4, 100).unwrap();
        assert_eq!(project.layers().len(), 1);
        assert_eq!((project.height(), project.width(), project.max_value()), (3, 4, 100));
    }

    #[test]
    fn from_layers_keeps_order_without_background() {
        let layers = vec![
            Layer::new("top", 1, 2, 255).unwrap(),
            Layer::new("bottom", 1, 2, 255).unwrap(),
        ];
        let project = Project::from_layers(1, 2, 255, layers).unwrap();
        let names: Vec<&str> = project.layers().iter().map(Layer::name).collect();
        assert_eq!(names, ["top", "bottom"]);

        let mismatched = vec![Layer::new("wide", 1, 3, 255).unwrap()];
        let result = Project::from_layers(1, 2, 255, mismatched);
        assert!(matches!(result, Err(Error::LayerDimensionMismatch { .. })));
    }

    #[test]
    fn empty_project_cannot_be_flattened() {
        let mut project = Project::new(1, 1, 255).unwrap();
        project.remove_layer("background");
        assert!(project.render_layers().is_empty());
        assert!(matches!(project.save_image(), Err(Error::EmptyProject)));
    }

    #[test]
    fn given_layer_must_match_dimension() {
        let mut project = Project::new(2, 2, 255).unwrap();
        let layer = crate::layer::Layer::new("small", 1, 1, 255).unwrap();
        assert!(matches!(
            project.add_given_layer(layer),
            Err(Error::LayerDimensionMismatch { .. })
        ));
    }

    #[test]
    fn partially_visible_image_is_placed_without_error() {
        let mut project = Project::new(2, 2, 255).unwrap();
        project.add_layer("first").unwrap();
        project
            .add_image_to_layer("first", solid(2, 2, [0, 0, 0, 255]), -1, 1)
            .unwrap();
        let layer = project.layer("first").unwrap();
        assert_eq!(layer.pixel(Position::new(0, 1)).unwrap().rgba(), [0, 0, 0, 255]);
        assert_eq!(layer.pixel(Position::new(0, 0)).unwrap().alpha(), 0);
    }
}
