pub trait Drawable {
    type ExtraData;
    type Error;

    fn draw(&self, extra_data: &mut Self::ExtraData) -> Result<(), Self::Error>;
}
