use log::debug;

use crate::controllers::{
    booking::BookingForm, cards::CardEmphasis, counter::CounterAnimation, cursor::PointerIndicator,
    gallery::GalleryDrag, hero::HeroIntro, magnetic::MagneticButtons, marquee::MarqueeSpeed,
    motion, navigation::Navigation, parallax::Parallax, progress::ScrollProgress,
    reveal::RevealOnScroll,
};
use crate::dom;

/// Every controller attached to the page. Dropping it detaches them all.
pub struct Interactions {
    pointer: Option<PointerIndicator>,
    progress: Option<ScrollProgress>,
    navigation: Option<Navigation>,
    reveal: Option<RevealOnScroll>,
    counters: Option<CounterAnimation>,
    booking: Option<BookingForm>,
    gallery: Option<GalleryDrag>,
    parallax: Option<Parallax>,
    cards: Option<CardEmphasis>,
    marquee: Option<MarqueeSpeed>,
    magnetic: Option<MagneticButtons>,
    hero: Option<HeroIntro>,
}

impl Interactions {
    /// Installs each controller independently; a controller whose elements
    /// are missing is skipped without affecting the others.
    pub fn install() -> Self {
        let reduced_motion = dom::prefers_reduced_motion();
        if reduced_motion {
            let stilled = motion::still_decorations();
            debug!("Reduced motion requested, stilled {} decorations", stilled);
        }

        Interactions {
            pointer: installed("pointer indicator", PointerIndicator::install()),
            progress: installed("scroll progress", ScrollProgress::install()),
            navigation: installed("navigation", Navigation::install()),
            reveal: installed("reveal on scroll", RevealOnScroll::install()),
            counters: installed("counters", CounterAnimation::install()),
            booking: installed("booking form", BookingForm::install()),
            gallery: installed("gallery drag", GalleryDrag::install()),
            parallax: installed("parallax", Parallax::install()),
            cards: installed("card emphasis", CardEmphasis::install()),
            marquee: if reduced_motion {
                None
            } else {
                installed("marquee speed", MarqueeSpeed::install())
            },
            magnetic: installed("magnetic buttons", MagneticButtons::install()),
            hero: installed("hero intro", HeroIntro::install()),
        }
    }

    pub fn installed_count(&self) -> usize {
        [
            self.pointer.is_some(),
            self.progress.is_some(),
            self.navigation.is_some(),
            self.reveal.is_some(),
            self.counters.is_some(),
            self.booking.is_some(),
            self.gallery.is_some(),
            self.parallax.is_some(),
            self.cards.is_some(),
            self.marquee.is_some(),
            self.magnetic.is_some(),
            self.hero.is_some(),
        ]
        .into_iter()
        .filter(|on| *on)
        .count()
    }
}

fn installed<T>(name: &str, controller: Option<T>) -> Option<T> {
    if controller.is_none() {
        debug!("Skipping {}: elements missing or not supported on this device", name);
    }
    controller
}
