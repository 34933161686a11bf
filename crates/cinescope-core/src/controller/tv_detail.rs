use super::{publish, CREDITS_UNAVAILABLE, DETAILS_UNAVAILABLE, SHOWS_UNAVAILABLE, VIDEOS_UNAVAILABLE};
use crate::paging::FIRST_PAGE;
use crate::repository::{TvList, TvRepository};
use crate::state::Slot;
use cinescope_models::{Credits, TvDetail, TvShow, Videos};

pub struct TvDetailController {
    tv: TvRepository,
    pub details: Slot<TvDetail>,
    pub credits: Slot<Credits>,
    pub videos: Slot<Videos>,
    pub similar: Slot<Vec<TvShow>>,
}

impl TvDetailController {
    pub fn new(tv: TvRepository) -> Self {
        Self {
            tv,
            details: Slot::new(),
            credits: Slot::new(),
            videos: Slot::new(),
            similar: Slot::new(),
        }
    }

    pub async fn load(&self, id: i64) {
        self.details.loading();
        self.credits.loading();
        self.videos.loading();
        self.similar.loading();

        let similar_list = TvList::Similar(id);
        let (details, credits, videos, similar) = tokio::join!(
            self.tv.details(id),
            self.tv.credits(id),
            self.tv.videos(id),
            self.tv.list_page(&similar_list, FIRST_PAGE),
        );

        publish(&self.details, "series details", details, DETAILS_UNAVAILABLE);
        publish(&self.credits, "series credits", credits, CREDITS_UNAVAILABLE);
        publish(&self.videos, "series videos", videos, VIDEOS_UNAVAILABLE);
        publish(
            &self.similar,
            "similar series",
            similar.map(|page| page.results),
            SHOWS_UNAVAILABLE,
        );
    }
}
