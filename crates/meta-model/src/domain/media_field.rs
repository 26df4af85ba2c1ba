use serde::{Deserialize, Serialize};

/// Instagram media field that can be requested when listing media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaField {
    Id,
    MediaType,
    MediaUrl,
    Permalink,
    ThumbnailUrl,
    Timestamp,
    Caption,
    Username,
    CommentsCount,
    LikeCount,
    IsSharedToFeed,
    BoostAdsList,
    BoostEligibilityInfo,
    IsCommentEnabled,
    ViewCount,
}

impl MediaField {
    /// Fields requested when the caller does not pick any.
    pub const DEFAULTS: [MediaField; 7] = [
        MediaField::Id,
        MediaField::MediaType,
        MediaField::MediaUrl,
        MediaField::Permalink,
        MediaField::ThumbnailUrl,
        MediaField::Timestamp,
        MediaField::Caption,
    ];

    /// Graph API field name (`snake_case`).
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaField::Id => "id",
            MediaField::MediaType => "media_type",
            MediaField::MediaUrl => "media_url",
            MediaField::Permalink => "permalink",
            MediaField::ThumbnailUrl => "thumbnail_url",
            MediaField::Timestamp => "timestamp",
            MediaField::Caption => "caption",
            MediaField::Username => "username",
            MediaField::CommentsCount => "comments_count",
            MediaField::LikeCount => "like_count",
            MediaField::IsSharedToFeed => "is_shared_to_feed",
            MediaField::BoostAdsList => "boost_ads_list",
            MediaField::BoostEligibilityInfo => "boost_eligibility_info",
            MediaField::IsCommentEnabled => "is_comment_enabled",
            MediaField::ViewCount => "view_count",
        }
    }

    /// Key used for this field in normalised output rows (`camelCase`).
    pub fn output_key(&self) -> &'static str {
        match self {
            MediaField::Id => "id",
            MediaField::MediaType => "mediaType",
            MediaField::MediaUrl => "mediaUrl",
            MediaField::Permalink => "permalink",
            MediaField::ThumbnailUrl => "thumbnailUrl",
            MediaField::Timestamp => "timestamp",
            MediaField::Caption => "caption",
            MediaField::Username => "username",
            MediaField::CommentsCount => "commentsCount",
            MediaField::LikeCount => "likeCount",
            MediaField::IsSharedToFeed => "isSharedToFeed",
            MediaField::BoostAdsList => "boostAdsList",
            MediaField::BoostEligibilityInfo => "boostEligibilityInfo",
            MediaField::IsCommentEnabled => "isCommentEnabled",
            MediaField::ViewCount => "viewCount",
        }
    }

    /// Comma-joined wire value for the `fields` query parameter.
    pub fn join(fields: &[MediaField]) -> String {
        fields
            .iter()
            .map(MediaField::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}
