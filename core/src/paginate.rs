use serde::Serialize;

/// One page of a sorted result list.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

/// Slice `items` into 1-based pages of `page_size`. A page beyond the end
/// yields an empty slice with the totals still reported.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let limit = page_size.max(1);
    let total_count = items.len();
    let total_pages = total_count.div_ceil(limit);
    let start = (page - 1).saturating_mul(limit);
    let page_items: Vec<T> = if start >= total_count {
        Vec::new()
    } else {
        items.into_iter().skip(start).take(limit).collect()
    };
    Page {
        items: page_items,
        total_count,
        page,
        limit,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_25_items_into_three_pages() {
        let items: Vec<u32> = (0..25).collect();
        let p1 = paginate(items.clone(), 1, 10);
        assert_eq!(p1.items.len(), 10);
        assert_eq!(p1.total_pages, 3);
        assert_eq!(p1.total_count, 25);

        let p2 = paginate(items.clone(), 2, 10);
        assert_eq!(p2.items.len(), 10);
        assert_eq!(p2.items[0], 10);

        let p3 = paginate(items, 3, 10);
        assert_eq!(p3.items.len(), 5);
    }

    #[test]
    fn out_of_range_page_is_empty_with_correct_totals() {
        let items: Vec<u32> = (0..25).collect();
        let p4 = paginate(items, 4, 10);
        assert!(p4.items.is_empty());
        assert_eq!(p4.total_pages, 3);
        assert_eq!(p4.total_count, 25);
    }

    #[test]
    fn empty_input_yields_zero_pages() {
        let p = paginate(Vec::<u32>::new(), 1, 10);
        assert!(p.items.is_empty());
        assert_eq!(p.total_pages, 0);
    }
}
