use serde::Serialize;

/// 默认每页显示数量
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// 分页控件中的一项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageControl {
    /// 页码按钮
    Page { number: usize, active: bool },
    /// 省略号占位
    Ellipsis,
}

/// 分页计算
///
/// 当前页在构造时被限制在 `[1, total_pages]` 内，
/// 因此筛选条件变化后旧页码不会产生空窗口。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

impl Pagination {
    pub fn new(total_items: usize, page_size: usize, requested_page: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_pages(total_items, page_size);
        let current_page = requested_page.clamp(1, total_pages.max(1));

        Self {
            page_size,
            total_items,
            total_pages,
            current_page,
        }
    }

    /// 当前页在列表中的下标范围
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    /// 截取当前页窗口
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        &items[range.start.min(end)..end]
    }

    /// 只有一页时不显示分页栏
    pub fn has_controls(&self) -> bool {
        self.total_pages > 1
    }

    /// 生成分页控件
    ///
    /// 始终显示首页、末页、当前页及其前后两页；
    /// 恰好位于当前页前后第三页且未被显示的位置放一个省略号。
    pub fn controls(&self) -> Vec<PageControl> {
        let current = self.current_page;
        let last = self.total_pages;
        let mut controls = Vec::new();

        for page in 1..=last {
            let visible =
                page == 1 || page == last || page.abs_diff(current) <= 2;

            if visible {
                controls.push(PageControl::Page {
                    number: page,
                    active: page == current,
                });
            } else if page.abs_diff(current) == 3 {
                controls.push(PageControl::Ellipsis);
            }
        }

        controls
    }
}

/// 总页数，向上取整
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}
